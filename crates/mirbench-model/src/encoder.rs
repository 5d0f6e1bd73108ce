//! One-hot Watson–Crick interaction encoding.
//!
//! Each (gene, miRNA) pair becomes a `gene_len × mirna_len × 1` matrix whose
//! cell `(i, j)` is 1.0 iff gene base `i` pairs with miRNA base `j`
//! (A-T, T-A, G-C, C-G). Short sequences leave trailing cells at 0.

use candle_core::{Device, Tensor};
use mirbench_common::sequence::{canonical, is_watson_crick};
use mirbench_common::{MirbenchError, TestRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::TensorShape;

/// What to do with a sequence longer than the tensor allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Fail with [`MirbenchError::SequenceLength`].
    #[default]
    Reject,
    /// Ignore the tail beyond the tensor bounds.
    Truncate,
}

/// Summary of an encoding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingStats {
    pub records: usize,
    /// Records with at least one sequence cut short (Truncate policy only).
    pub truncated: usize,
}

/// Stacked interaction tensors plus their labels, stored row-major as
/// `(record, gene position, miRNA position, channel)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionBatch {
    data: Vec<f32>,
    shape: TensorShape,
    labels: Vec<u8>,
}

impl InteractionBatch {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn shape(&self) -> TensorShape {
        self.shape
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Flat row-major data for all records.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Cell `(i, j)` of record `n`.
    pub fn get(&self, n: usize, i: usize, j: usize) -> Option<f32> {
        if n >= self.len() || i >= self.shape.gene_len || j >= self.shape.mirna_len {
            return None;
        }
        Some(self.data[n * self.shape.cells() + i * self.shape.mirna_len + j])
    }

    /// Flat matrix of one record.
    pub fn record(&self, n: usize) -> Option<&[f32]> {
        let cells = self.shape.cells();
        self.data.get(n * cells..(n + 1) * cells)
    }

    /// Whole batch as a `(N, gene_len, mirna_len, 1)` tensor.
    pub fn to_tensor(&self, device: &Device) -> candle_core::Result<Tensor> {
        self.to_tensor_range(0, self.len(), device)
    }

    /// Records `start..end` as a `(end - start, gene_len, mirna_len, 1)` tensor.
    pub fn to_tensor_range(&self, start: usize, end: usize, device: &Device) -> candle_core::Result<Tensor> {
        let end = end.min(self.len());
        let start = start.min(end);
        let cells = self.shape.cells();
        let (g, m, c) = self.shape.dims();
        Tensor::from_slice(&self.data[start * cells..end * cells], (end - start, g, m, c), device)
    }
}

/// Deterministic encoder from test records to an [`InteractionBatch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OneHotEncoder {
    shape: TensorShape,
    policy: LengthPolicy,
}

impl OneHotEncoder {
    pub fn new(shape: TensorShape, policy: LengthPolicy) -> Self {
        Self { shape, policy }
    }

    pub fn shape(&self) -> TensorShape {
        self.shape
    }

    pub fn policy(&self) -> LengthPolicy {
        self.policy
    }

    /// Encode all records. Under [`LengthPolicy::Reject`] the first oversized
    /// sequence aborts the whole batch.
    pub fn encode(&self, records: &[TestRecord]) -> mirbench_common::Result<(InteractionBatch, EncodingStats)> {
        if self.shape.cells() == 0 {
            return Err(MirbenchError::InvalidInput(format!(
                "tensor shape {}x{} has no cells",
                self.shape.gene_len, self.shape.mirna_len
            )));
        }

        let cells = self.shape.cells();
        let mut data = vec![0.0f32; records.len() * cells];
        let mut labels = Vec::with_capacity(records.len());
        let mut stats = EncodingStats { records: records.len(), truncated: 0 };

        for (n, record) in records.iter().enumerate() {
            let gene = canonical(&record.gene);
            let mirna = canonical(&record.mirna);

            let oversized = self.check_length(n, "gene", gene.len(), self.shape.gene_len)?
                | self.check_length(n, "miRNA", mirna.len(), self.shape.mirna_len)?;
            if oversized {
                stats.truncated += 1;
            }

            let matrix = &mut data[n * cells..(n + 1) * cells];
            for (i, &g) in gene.iter().take(self.shape.gene_len).enumerate() {
                let row = &mut matrix[i * self.shape.mirna_len..(i + 1) * self.shape.mirna_len];
                for (j, &m) in mirna.iter().take(self.shape.mirna_len).enumerate() {
                    if is_watson_crick(g, m) {
                        row[j] = 1.0;
                    }
                }
            }
            labels.push(record.label);
        }

        if stats.truncated > 0 {
            warn!(
                "Truncated {} of {} records to the {}x{} tensor",
                stats.truncated, stats.records, self.shape.gene_len, self.shape.mirna_len
            );
        }
        debug!("Encoded {} records into {:?}", records.len(), self.shape);

        Ok((InteractionBatch { data, shape: self.shape, labels }, stats))
    }

    /// Returns whether the sequence overflows; errors under the Reject policy.
    fn check_length(&self, record: usize, which: &'static str, len: usize, max: usize) -> mirbench_common::Result<bool> {
        if len <= max {
            return Ok(false);
        }
        match self.policy {
            LengthPolicy::Reject => Err(MirbenchError::SequenceLength { record, which, len, max }),
            LengthPolicy::Truncate => Ok(true),
        }
    }
}
