//! Evaluation report: one entry per compared method.

use std::path::Path;

use anyhow::Context;
use mirbench_metrics::{OperatingPoint, PrCurve};
use mirbench_model::EncodingStats;
use serde::{Deserialize, Serialize};

/// Result of one method on the test set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodResult {
    pub name: String,
    /// Hex line colour, e.g. `#00429d`.
    pub color: String,
    pub outcome: MethodOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodOutcome {
    /// Score-based method: full precision-recall curve.
    Curve { auc: f64, curve: PrCurve },
    /// Binary rule: a single (precision, recall) point.
    OperatingPoint(OperatingPoint),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub test_set: String,
    pub dataset_ratio: String,
    pub records: usize,
    pub positives: usize,
    pub negatives: usize,
    pub encoding: EncodingStats,
    pub methods: Vec<MethodResult>,
}

impl EvalReport {
    /// AUC of a curve method, `None` for unknown names and operating points.
    pub fn auc(&self, name: &str) -> Option<f64> {
        self.method(name).and_then(|m| match &m.outcome {
            MethodOutcome::Curve { auc, .. } => Some(*auc),
            MethodOutcome::OperatingPoint(_) => None,
        })
    }

    pub fn method(&self, name: &str) -> Option<&MethodResult> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Generate a human-readable summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n=== PR evaluation on 1:{} test set ===\n\n", self.dataset_ratio));
        out.push_str(&format!("Test set: {}\n", self.test_set));
        out.push_str(&format!(
            "Samples: {} ({} positive, {} negative)\n",
            self.records, self.positives, self.negatives
        ));
        if self.encoding.truncated > 0 {
            out.push_str(&format!("Truncated records: {}\n", self.encoding.truncated));
        }
        out.push('\n');
        for m in &self.methods {
            match &m.outcome {
                MethodOutcome::Curve { auc, .. } => {
                    out.push_str(&format!("{:<16} PR-AUC {:.4}\n", m.name, auc));
                }
                MethodOutcome::OperatingPoint(op) => {
                    out.push_str(&format!(
                        "{:<16} recall {:.4}  precision {:.4}\n",
                        m.name, op.recall, op.precision
                    ));
                }
            }
        }
        out
    }

    pub async fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write report {}", path.display()))
    }
}
