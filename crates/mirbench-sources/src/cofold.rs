//! RNAcofold free-energy loader.
//!
//! The file holds one record per test pair, three lines each: a header, the
//! concatenated sequences, and the dot-bracket structure followed by the
//! minimum free energy in parentheses, e.g.
//!
//! ```text
//! >pair_17
//! ACGUAGCUAGCUAGC&UAGCUAGCUAG
//! ((((....))))...&...((((..)))) (-23.40)
//! ```
//!
//! Lower free energy means a more stable duplex, so the value is negated to
//! obtain a binding score before min-max normalisation.

use std::path::Path;

use mirbench_common::normalise::minmax_normalise_all;
use mirbench_common::{MirbenchError, Result};
use tracing::{debug, info};

/// Lines per cofold record.
const RECORD_LINES: usize = 3;

/// Cofold scores in test-set order.
#[derive(Debug, Clone, PartialEq)]
pub struct CofoldScores {
    /// Negated free energies rescaled to [0, 1].
    pub normalized: Vec<f64>,
    /// Negated free energies (kcal/mol, sign flipped).
    pub raw: Vec<f64>,
}

impl CofoldScores {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Load and normalise a cofold output file.
pub async fn load_cofold(path: impl AsRef<Path>) -> Result<CofoldScores> {
    let path = path.as_ref();
    debug!("Loading cofold energies from {:?}", path);

    let content = tokio::fs::read_to_string(path).await?;
    let scores = parse_cofold(&content, &crate::source_name(path))?;

    info!("Loaded {} cofold records", scores.len());
    Ok(scores)
}

/// Parse cofold output. `source_name` only labels diagnostics.
pub fn parse_cofold(content: &str, source_name: &str) -> Result<CofoldScores> {
    let mut lines: Vec<&str> = content.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return Err(MirbenchError::InvalidInput(format!(
            "{} contains no cofold records",
            source_name
        )));
    }

    let complete = lines.len() / RECORD_LINES * RECORD_LINES;
    if complete != lines.len() {
        return Err(MirbenchError::parse(
            source_name,
            complete + 1,
            format!(
                "incomplete record: expected {} lines, found {}",
                RECORD_LINES,
                lines.len() - complete
            ),
        ));
    }

    let raw = lines
        .chunks(RECORD_LINES)
        .enumerate()
        .map(|(record, chunk)| {
            let line_no = record * RECORD_LINES + RECORD_LINES;
            let energy = parse_energy(chunk[RECORD_LINES - 1]).ok_or_else(|| {
                MirbenchError::parse(
                    source_name,
                    line_no,
                    format!(
                        "expected a trailing '(<free energy>)', got {:?}",
                        chunk[RECORD_LINES - 1]
                    ),
                )
            })?;
            Ok(-energy)
        })
        .collect::<Result<Vec<f64>>>()?;

    let normalized = minmax_normalise_all(&raw);
    Ok(CofoldScores { normalized, raw })
}

/// Extract the value of the trailing `(<float>)` group of a structure line.
/// All printed digits are kept.
fn parse_energy(line: &str) -> Option<f64> {
    let body = line.trim_end().strip_suffix(')')?;
    let open = body.rfind('(')?;
    body[open + 1..].trim().parse::<f64>().ok()
}
