use std::fmt;

use thiserror::Error;

/// Class of a test record, used when reporting count inconsistencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreClass {
    Positive,
    Negative,
}

impl fmt::Display for ScoreClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreClass::Positive => f.write_str("positive"),
            ScoreClass::Negative => f.write_str("negative"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MirbenchError {
    #[error("{source_name}:{line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("{class} count mismatch: observed {observed} entries but only {expected} expected")]
    CountMismatch {
        class: ScoreClass,
        expected: usize,
        observed: usize,
    },

    #[error("record {record}: {which} sequence has length {len}, tensor allows at most {max}")]
    SequenceLength {
        record: usize,
        which: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Length mismatch for {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl MirbenchError {
    /// Shorthand for a parse error at a 1-indexed line of a named source.
    pub fn parse(source_name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        MirbenchError::Parse {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MirbenchError>;
