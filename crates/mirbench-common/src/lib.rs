//! mirbench-common — Shared types, errors, and helpers used across all mirbench crates.

pub mod error;
pub mod records;
pub mod sequence;
pub mod normalise;

// Re-export commonly used types
pub use error::{MirbenchError, Result, ScoreClass};
pub use records::{LabeledScores, TestRecord, TestSet};
pub use normalise::minmax_normalise;
