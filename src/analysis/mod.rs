//! Analysis of the logged corpus

pub mod stats;

pub use stats::{CorpusStats, OutcomeDistribution};
