pub mod analyze;
pub mod browse;
pub mod export;
pub mod import;
pub mod remove;
pub mod stats;
