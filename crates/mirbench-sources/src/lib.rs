//! mirbench-sources — Loaders that turn each tool's native output into
//! `(label, score)` pairs aligned with the shared test set.
//!
//! Every loader comes in two halves: a pure `parse_*` function over the file
//! content, and an async `load_*` wrapper that reads the file with `tokio::fs`.

pub mod cofold;
pub mod rna22;
pub mod test_set;

pub use cofold::{load_cofold, parse_cofold, CofoldScores};
pub use rna22::{load_rna22, parse_rna22, ExpectedCounts};
pub use test_set::{load_test_set, parse_test_set};

use std::path::Path;

/// Display name used in parse diagnostics for a file on disk.
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
