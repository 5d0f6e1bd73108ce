//! RNA22 prediction loader.
//!
//! RNA22 writes one tab-separated row per reported interaction, without a
//! header. Column 10 holds a p-value and column 11 the ground-truth label.
//! Test pairs for which RNA22 reports nothing are absent from the file, so the
//! loader backfills them with the lowest possible score to keep the label
//! vector aligned with the test set's class counts.

use std::path::Path;

use mirbench_common::normalise::minmax_normalise_all;
use mirbench_common::{LabeledScores, MirbenchError, Result, ScoreClass};
use tracing::{debug, info, warn};

/// 0-indexed column holding the p-value.
pub const PVALUE_COLUMN: usize = 10;

/// 0-indexed column holding the label.
pub const LABEL_COLUMN: usize = 11;

/// Score assigned to test pairs RNA22 did not report (post-normalisation).
pub const BACKFILL_SCORE: f64 = 0.0;

/// Number of positive and negative pairs in the test set RNA22 was run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedCounts {
    pub positives: usize,
    pub negatives: usize,
}

impl ExpectedCounts {
    pub fn new(positives: usize, negatives: usize) -> Self {
        Self { positives, negatives }
    }

    pub fn total(&self) -> usize {
        self.positives + self.negatives
    }
}

/// Load an RNA22 output file and backfill unreported pairs.
pub async fn load_rna22(path: impl AsRef<Path>, expected: ExpectedCounts) -> Result<LabeledScores> {
    let path = path.as_ref();
    debug!("Loading RNA22 predictions from {:?}", path);

    let content = tokio::fs::read_to_string(path).await?;
    let scores = parse_rna22(&content, &crate::source_name(path), expected)?;

    info!("Loaded RNA22 predictions: {} pairs after backfill", scores.len());
    Ok(scores)
}

/// Parse RNA22 output into labels and normalised `1 - p` scores, in file order
/// followed by positive then negative backfill entries.
pub fn parse_rna22(content: &str, source_name: &str, expected: ExpectedCounts) -> Result<LabeledScores> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let mut labels: Vec<u8> = Vec::new();
    let mut raw: Vec<f64> = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 1);

        if record.len() <= LABEL_COLUMN {
            return Err(MirbenchError::parse(
                source_name,
                line,
                format!(
                    "expected at least {} columns, found {}",
                    LABEL_COLUMN + 1,
                    record.len()
                ),
            ));
        }

        let pvalue_field = record[PVALUE_COLUMN].trim();
        let pvalue: f64 = pvalue_field.parse().map_err(|_| {
            MirbenchError::parse(source_name, line, format!("invalid p-value {:?}", pvalue_field))
        })?;

        let label = match record[LABEL_COLUMN].trim() {
            "0" => 0u8,
            "1" => 1u8,
            other => {
                return Err(MirbenchError::parse(
                    source_name,
                    line,
                    format!("label must be 0 or 1, got {:?}", other),
                ))
            }
        };

        // p-value: lower is more confident, so invert it into a score
        raw.push(1.0 - pvalue);
        labels.push(label);
    }

    let mut scores = minmax_normalise_all(&raw);

    let observed_pos = labels.iter().filter(|&&l| l == 1).count();
    let observed_neg = labels.len() - observed_pos;
    let missing_pos = backfill_count(ScoreClass::Positive, expected.positives, observed_pos)?;
    let missing_neg = backfill_count(ScoreClass::Negative, expected.negatives, observed_neg)?;

    if missing_pos + missing_neg > 0 {
        warn!(
            "{}: backfilling {} positive and {} negative pairs without an RNA22 prediction",
            source_name, missing_pos, missing_neg
        );
    }

    labels.extend(std::iter::repeat(1u8).take(missing_pos));
    labels.extend(std::iter::repeat(0u8).take(missing_neg));
    scores.extend(std::iter::repeat(BACKFILL_SCORE).take(missing_pos + missing_neg));

    LabeledScores::new(labels, scores)
}

fn backfill_count(class: ScoreClass, expected: usize, observed: usize) -> Result<usize> {
    expected
        .checked_sub(observed)
        .ok_or(MirbenchError::CountMismatch {
            class,
            expected,
            observed,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pvalue: &str, label: &str) -> String {
        let mut cols: Vec<String> = (0..PVALUE_COLUMN).map(|c| format!("c{c}")).collect();
        cols.push(pvalue.to_string());
        cols.push(label.to_string());
        cols.join("\t")
    }

    #[test]
    fn test_parse_rna22_inverts_and_backfills() {
        let content = [row("0.01", "1"), row("0.5", "0"), row("0.11", "1")].join("\n");
        let scores = parse_rna22(&content, "rna22.txt", ExpectedCounts::new(4, 3)).unwrap();

        assert_eq!(scores.len(), 7);
        assert_eq!(scores.labels(), &[1, 0, 1, 1, 1, 0, 0]);

        let s = scores.scores();
        assert!((s[0] - 1.0).abs() < 1e-12); // p = 0.01 is the best
        assert!((s[1] - 0.0).abs() < 1e-12); // p = 0.5 is the worst observed
        assert!((s[2] - (0.89 - 0.5) / (0.99 - 0.5)).abs() < 1e-12);
        assert!(s[3..].iter().all(|&v| v == BACKFILL_SCORE));
    }

    #[test]
    fn test_observed_exceeding_expected_is_error() {
        let content = [row("0.01", "1"), row("0.2", "1")].join("\n");
        let err = parse_rna22(&content, "rna22.txt", ExpectedCounts::new(1, 5)).unwrap_err();
        match err {
            MirbenchError::CountMismatch { class, expected, observed } => {
                assert_eq!(class, ScoreClass::Positive);
                assert_eq!(expected, 1);
                assert_eq!(observed, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let content = format!("{}\na\tb\tc\n", row("0.3", "0"));
        let err = parse_rna22(&content, "rna22.txt", ExpectedCounts::new(5, 5)).unwrap_err();
        assert!(matches!(err, MirbenchError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_label_is_parse_error() {
        let content = row("0.3", "yes");
        let err = parse_rna22(&content, "rna22.txt", ExpectedCounts::new(5, 5)).unwrap_err();
        assert!(matches!(err, MirbenchError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_file_is_fully_backfilled() {
        let scores = parse_rna22("", "rna22.txt", ExpectedCounts::new(2, 3)).unwrap();
        assert_eq!(scores.len(), 5);
        assert_eq!(scores.positive_count(), 2);
        assert!(scores.scores().iter().all(|&v| v == BACKFILL_SCORE));
    }
}
