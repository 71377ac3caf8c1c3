//! ADN Seq Core Library
//!
//! Validation de séquences nucléotidiques et métriques descriptives
//! (composition, GC/AT, Tm, ORF, complément inverse).

pub mod analyzer;
pub mod error;
pub mod logging;
pub mod orf;
pub mod record;
pub mod sequence;
pub mod stats;

// Réexportations principales
pub use analyzer::{
    analyze, reverse_complement, validate, Analysis, AnalyzerConfig, SequenceAnalyzer,
    SequenceMetrics, ANALYZER_VERSION,
};
pub use error::{Result, ValidationError};
pub use logging::init_logging;
pub use orf::{find_orfs, longest_orf, OrfMatch, DEFAULT_MIN_ORF_LENGTH};
pub use record::{BaseComposition, NewSequence, SequenceRecord};
pub use sequence::{Alphabet, CleanSequence, IupacBase};
pub use stats::{CollectionSummary, ComparisonRow, Describe, HistogramBin};
