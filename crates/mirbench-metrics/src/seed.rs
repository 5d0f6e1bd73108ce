//! Seed-match baseline.
//!
//! The canonical miRNA seed spans positions 2–7 (1-indexed). A gene is called
//! a target iff it contains the reverse complement of the seed. The rule has
//! no scores, so it yields a single operating point instead of a curve.

use mirbench_common::sequence::{canonical, reverse_complement};
use mirbench_common::{MirbenchError, Result, TestRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pr::precision;

/// 0-indexed half-open range of the seed within the miRNA.
const SEED_START: usize = 1;
const SEED_END: usize = 7;

/// Confusion counts of a binary classifier together with its precision and recall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub precision: f64,
    pub recall: f64,
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl OperatingPoint {
    pub fn from_counts(tp: usize, fp: usize, tn: usize, fn_: usize) -> Self {
        let recall = if tp + fn_ == 0 { 0.0 } else { tp as f64 / (tp + fn_) as f64 };
        Self {
            precision: precision(tp, fp),
            recall,
            tp,
            fp,
            tn,
            fn_,
        }
    }
}

/// Target site a miRNA's seed binds to: reverse complement of positions 2–7.
pub fn seed_site(mirna: &str) -> Result<Vec<u8>> {
    let mirna = canonical(mirna);
    if mirna.len() < SEED_END {
        return Err(MirbenchError::InvalidSequence(format!(
            "miRNA {:?} is shorter than the {}-nt seed region",
            String::from_utf8_lossy(&mirna),
            SEED_END
        )));
    }
    reverse_complement(&mirna[SEED_START..SEED_END])
}

/// True iff the gene contains the seed site of the miRNA.
pub fn seed_match(mirna: &str, gene: &str) -> Result<bool> {
    let site = seed_site(mirna)?;
    let gene = canonical(gene);
    Ok(gene.windows(site.len()).any(|w| w == site.as_slice()))
}

/// Classify every record with [`seed_match`] and tally the result.
pub fn seed_operating_point(records: &[TestRecord]) -> Result<OperatingPoint> {
    let (mut tp, mut fp, mut tn, mut fn_) = (0, 0, 0, 0);

    for record in records {
        match (seed_match(&record.mirna, &record.gene)?, record.is_positive()) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_ += 1,
            (false, false) => tn += 1,
        }
    }

    debug!("Seed confusion counts: tp={} fp={} tn={} fn={}", tp, fp, tn, fn_);
    Ok(OperatingPoint::from_counts(tp, fp, tn, fn_))
}
