//! Stockage SQLite des séquences analysées

pub mod confirm;
pub mod database;
pub mod error;
pub mod export;
pub mod repository;
pub mod submit;

pub use confirm::{execute, ConfirmationGate, ConfirmationToken, DestructiveAction};
pub use database::{Database, DatabaseConfig, Session};
pub use error::{Result, StorageError};
pub use export::{export_file_name, to_csv_string, write_csv, CSV_HEADER};
pub use repository::{DbSequence, RangeFilter, SequenceStore};
pub use submit::{save_analysis, save_to_database, submit, submit_to_database, Submission};
