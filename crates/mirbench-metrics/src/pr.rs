//! Precision-recall curve and its area.
//!
//! Points follow the usual definition: scores are sorted in descending order
//! and every distinct score is a threshold. The curve is cut once full recall
//! is reached, since lower thresholds can only add false positives at
//! recall 1. The area is taken by the trapezoidal rule over
//! `(recall, precision)`, starting from the anchor `(0, 1)`.

use mirbench_common::{LabeledScores, MirbenchError, Result};
use serde::{Deserialize, Serialize};

/// A single point on the precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrPoint {
    /// Score threshold: everything at or above it is predicted positive.
    pub threshold: f64,
    /// TP / (TP + FP).
    pub precision: f64,
    /// TP / (TP + FN), 0 when the labels contain no positives.
    pub recall: f64,
}

/// Precision-recall curve over a labeled score set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrCurve {
    /// Threshold points in descending-threshold (ascending-recall) order.
    pub points: Vec<PrPoint>,
    pub positives: usize,
    pub total: usize,
}

impl PrCurve {
    /// Build the curve from aligned labels and scores.
    pub fn from_scores(scores: &LabeledScores) -> Result<Self> {
        precision_recall_curve(scores.labels(), scores.scores())
    }

    /// `(recall, precision)` pairs for plotting, beginning at the `(0, 1)` anchor.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        std::iter::once((0.0, 1.0))
            .chain(self.points.iter().map(|p| (p.recall, p.precision)))
            .collect()
    }

    /// Area under the curve (trapezoidal rule).
    pub fn auc(&self) -> f64 {
        self.plot_points()
            .windows(2)
            .map(|w| (w[1].0 - w[0].0).abs() * (w[1].1 + w[0].1) / 2.0)
            .sum()
    }

    pub fn positive_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.positives as f64 / self.total as f64
    }
}

/// Compute the precision-recall curve from binary labels and scores.
pub fn precision_recall_curve(labels: &[u8], scores: &[f64]) -> Result<PrCurve> {
    if labels.is_empty() {
        return Err(MirbenchError::InvalidInput("empty label vector".into()));
    }
    if labels.len() != scores.len() {
        return Err(MirbenchError::LengthMismatch {
            context: "precision-recall labels vs scores".into(),
            expected: labels.len(),
            actual: scores.len(),
        });
    }
    if scores.iter().any(|s| s.is_nan()) {
        return Err(MirbenchError::InvalidInput("scores contain NaN".into()));
    }

    let positives = labels.iter().filter(|&&l| l == 1).count();

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut points = Vec::new();
    let mut tp = 0usize;
    let mut fp = 0usize;

    let mut i = 0;
    while i < order.len() {
        // Accumulate all samples sharing this score
        let threshold = scores[order[i]];
        while i < order.len() && scores[order[i]] == threshold {
            if labels[order[i]] == 1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }

        points.push(PrPoint {
            threshold,
            precision: precision(tp, fp),
            recall: if positives == 0 { 0.0 } else { tp as f64 / positives as f64 },
        });

        if positives > 0 && tp == positives {
            break;
        }
    }

    Ok(PrCurve {
        points,
        positives,
        total: labels.len(),
    })
}

/// Precision with the convention that no positive predictions give 1.
pub(crate) fn precision(tp: usize, fp: usize) -> f64 {
    if tp + fp == 0 {
        1.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_classifier_auc_is_one() {
        let curve = precision_recall_curve(&[1, 1, 0, 0], &[0.9, 0.8, 0.3, 0.1]).unwrap();
        assert!((curve.auc() - 1.0).abs() < 1e-12);
        // cut at full recall
        assert_eq!(curve.points.len(), 2);
        assert_eq!(curve.points[1].recall, 1.0);
    }

    #[test]
    fn test_constant_score_degenerates_to_single_point() {
        let curve = precision_recall_curve(&[1, 0, 0, 1, 0], &[0.4; 5]).unwrap();
        assert_eq!(curve.points.len(), 1);
        assert_eq!(curve.points[0].recall, 1.0);
        assert!((curve.points[0].precision - curve.positive_rate()).abs() < 1e-12);
        assert!((curve.points[0].precision - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_known_interleaved_curve() {
        // sorted: 0.9(1) 0.7(0) 0.6(1) 0.2(0)
        let curve = precision_recall_curve(&[0, 1, 1, 0], &[0.2, 0.9, 0.6, 0.7]).unwrap();
        let pts: Vec<(f64, f64)> = curve.plot_points();
        assert_eq!(pts, vec![(0.0, 1.0), (0.5, 1.0), (0.5, 0.5), (1.0, 2.0 / 3.0)]);

        let expected = 0.5 * 1.0 + 0.0 + 0.5 * (0.5 + 2.0 / 3.0) / 2.0;
        assert!((curve.auc() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ties_form_one_threshold() {
        let curve = precision_recall_curve(&[1, 0, 1, 0], &[0.5, 0.5, 0.2, 0.1]).unwrap();
        assert_eq!(curve.points[0].threshold, 0.5);
        assert_eq!(curve.points[0].precision, 0.5);
        assert_eq!(curve.points[0].recall, 0.5);
    }

    #[test]
    fn test_all_negative_labels() {
        let curve = precision_recall_curve(&[0, 0, 0], &[0.3, 0.2, 0.1]).unwrap();
        assert!(curve.points.iter().all(|p| p.recall == 0.0 && p.precision == 0.0));
        assert_eq!(curve.auc(), 0.0);
    }

    #[test]
    fn test_all_positive_labels() {
        let curve = precision_recall_curve(&[1, 1, 1], &[0.3, 0.2, 0.1]).unwrap();
        assert!(curve.points.iter().all(|p| p.precision == 1.0));
        assert!((curve.auc() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(precision_recall_curve(&[], &[]).is_err());
        assert!(precision_recall_curve(&[1, 0], &[0.1]).is_err());
        assert!(precision_recall_curve(&[1, 0], &[0.1, f64::NAN]).is_err());
    }

    #[test]
    fn test_precision_convention_without_predictions() {
        assert_eq!(precision(0, 0), 1.0);
        assert_eq!(precision(1, 3), 0.25);
    }
}
