//! Records shared between loaders, the encoder, and the metrics.

use serde::{Deserialize, Serialize};

use crate::{MirbenchError, Result};

// ---------------------------------------------------------------------------
// Test set
// ---------------------------------------------------------------------------

/// One row of the shared ground-truth test set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub gene: String,
    #[serde(rename = "miRNA")]
    pub mirna: String,
    pub label: u8,
}

impl TestRecord {
    pub fn new(gene: impl Into<String>, mirna: impl Into<String>, label: u8) -> Self {
        Self {
            gene: gene.into(),
            mirna: mirna.into(),
            label,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.label == 1
    }
}

/// The ordered test set every method is scored against.
#[derive(Debug, Clone, Default)]
pub struct TestSet {
    pub records: Vec<TestRecord>,
}

impl TestSet {
    pub fn new(records: Vec<TestRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn positive_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_positive()).count()
    }

    pub fn negative_count(&self) -> usize {
        self.len() - self.positive_count()
    }

    pub fn labels(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.label).collect()
    }
}

// ---------------------------------------------------------------------------
// Labeled scores
// ---------------------------------------------------------------------------

/// Aligned `(label, score)` pairs: the unit of comparison across methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledScores {
    labels: Vec<u8>,
    scores: Vec<f64>,
}

impl LabeledScores {
    /// Pair labels with scores. Lengths must match and labels must be 0 or 1.
    pub fn new(labels: Vec<u8>, scores: Vec<f64>) -> Result<Self> {
        if labels.len() != scores.len() {
            return Err(MirbenchError::LengthMismatch {
                context: "labels vs scores".to_string(),
                expected: labels.len(),
                actual: scores.len(),
            });
        }
        if let Some(bad) = labels.iter().find(|&&l| l > 1) {
            return Err(MirbenchError::InvalidInput(format!(
                "label {} is not binary",
                bad
            )));
        }
        Ok(Self { labels, scores })
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn positive_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<f64>) {
        (self.labels, self.scores)
    }
}
