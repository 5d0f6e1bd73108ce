//! Shared fixtures for mirbench tests: synthetic test sets and writers for
//! each tool's file format.

use std::path::{Path, PathBuf};

use mirbench_common::{TestRecord, TestSet};

pub use pretty_assertions;
pub use tempfile::{tempdir, TempDir};

/// Four-record test set: two positives whose seed matches the gene, two
/// negatives whose seed does not.
///
/// miRNA `ACGTGTACGT` has seed `CGTGTA`, target site `TACACG`.
pub fn synthetic_test_set() -> TestSet {
    TestSet::new(vec![
        TestRecord::new("GGTACACGGG", "ACGTGTACGT", 1),
        TestRecord::new("ttacacgaat", "acgtgtacgt", 1),
        TestRecord::new("GGGGGGGGGG", "ACGTGTACGT", 0),
        TestRecord::new("AAAAAAAAAA", "CCCCCCCCCC", 0),
    ])
}

/// Render a test set in the tab-separated format the loader reads.
pub fn test_set_tsv(set: &TestSet) -> String {
    let mut out = String::from("gene\tmiRNA\tlabel\n");
    for r in &set.records {
        out.push_str(&format!("{}\t{}\t{}\n", r.gene, r.mirna, r.label));
    }
    out
}

/// One cofold record (three lines) with the given free energy.
pub fn cofold_record(name: &str, energy: f64) -> String {
    format!(">{name}\nACGUACGU&UGCAUGCA\n((((....&....)))) ({energy:.2})\n")
}

/// One RNA22 row with `pvalue` in column 10 and `label` in column 11.
pub fn rna22_row(pvalue: f64, label: u8) -> String {
    let mut cols: Vec<String> = (0..10).map(|c| format!("field{c}")).collect();
    cols.push(pvalue.to_string());
    cols.push(label.to_string());
    cols.join("\t")
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}
