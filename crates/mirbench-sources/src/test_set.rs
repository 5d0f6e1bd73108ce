//! Test set loader: a tab-separated table with at least `gene`, `miRNA` and
//! `label` columns. Other columns are ignored.

use std::path::Path;

use mirbench_common::{MirbenchError, Result, TestRecord, TestSet};
use tracing::{debug, info};

/// Load the shared ground-truth test set.
pub async fn load_test_set(path: impl AsRef<Path>) -> Result<TestSet> {
    let path = path.as_ref();
    debug!("Loading test set from {:?}", path);

    let content = tokio::fs::read_to_string(path).await?;
    let set = parse_test_set(&content, &crate::source_name(path))?;

    info!(
        "Number of samples: {} ({} positive, {} negative)",
        set.len(),
        set.positive_count(),
        set.negative_count()
    );
    Ok(set)
}

pub fn parse_test_set(content: &str, source_name: &str) -> Result<TestSet> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    for required in ["gene", "miRNA", "label"] {
        if !headers.iter().any(|h| h == required) {
            return Err(MirbenchError::parse(
                source_name,
                1,
                format!("missing required column {:?}", required),
            ));
        }
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<TestRecord>().enumerate() {
        let record = result?;
        if record.label > 1 {
            // header is line 1
            return Err(MirbenchError::parse(
                source_name,
                i + 2,
                format!("label must be 0 or 1, got {}", record.label),
            ));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(MirbenchError::InvalidInput(format!(
            "{} contains no test records",
            source_name
        )));
    }

    Ok(TestSet::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_test_set_ignores_extra_columns() {
        let content = "\
noncodingRNA\tgene\tmiRNA\tlabel
hsa-miR-1\tACGTACGT\tTGCATGCA\t1
hsa-miR-2\tGGGGCCCC\tAAAATTTT\t0
";
        let set = parse_test_set(content, "test.tsv").unwrap();
        assert_eq!(
            set.records,
            vec![
                TestRecord::new("ACGTACGT", "TGCATGCA", 1),
                TestRecord::new("GGGGCCCC", "AAAATTTT", 0),
            ]
        );
    }

    #[test]
    fn test_missing_column_is_parse_error() {
        let content = "gene\tlabel\nACGT\t1\n";
        let err = parse_test_set(content, "test.tsv").unwrap_err();
        assert!(matches!(err, MirbenchError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_non_binary_label_is_parse_error() {
        let content = "gene\tmiRNA\tlabel\nACGT\tTGCA\t1\nACGT\tTGCA\t3\n";
        let err = parse_test_set(content, "test.tsv").unwrap_err();
        assert!(matches!(err, MirbenchError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_empty_test_set_is_rejected() {
        let err = parse_test_set("gene\tmiRNA\tlabel\n", "test.tsv").unwrap_err();
        assert!(matches!(err, MirbenchError::InvalidInput(_)));
    }
}
