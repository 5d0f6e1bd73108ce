//! Tensor and network configuration.

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Canonical interaction tensor shape: gene positions × miRNA positions × 1 channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorShape {
    /// Gene positions (rows). Default: 50
    pub gene_len: usize,
    /// miRNA positions (columns). Default: 20
    pub mirna_len: usize,
}

impl Default for TensorShape {
    fn default() -> Self {
        Self {
            gene_len: 50,
            mirna_len: 20,
        }
    }
}

impl TensorShape {
    pub fn new(gene_len: usize, mirna_len: usize) -> Self {
        Self { gene_len, mirna_len }
    }

    /// Cells per record (the channel dimension is always 1).
    pub fn cells(&self) -> usize {
        self.gene_len * self.mirna_len
    }

    /// Per-record dimensions `(gene_len, mirna_len, 1)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.gene_len, self.mirna_len, 1)
    }
}

/// Architecture of the interaction CNN, read from `config.json` next to the weights.
///
/// Each entry of `conv_filters` is one `conv2d(same) → relu → max_pool(2)`
/// block; each entry of `dense_units` one `linear → relu` layer, followed by
/// a single-unit sigmoid output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnnConfig {
    #[serde(default)]
    pub input: TensorShape,
    pub conv_filters: Vec<usize>,
    #[serde(default = "default_kernel_size")]
    pub kernel_size: usize,
    #[serde(default)]
    pub dense_units: Vec<usize>,
}

fn default_kernel_size() -> usize { 5 }

impl Default for CnnConfig {
    fn default() -> Self {
        Self {
            input: TensorShape::default(),
            conv_filters: vec![32, 64],
            kernel_size: default_kernel_size(),
            dense_units: vec![32],
        }
    }
}

impl CnnConfig {
    /// Check the architecture can be built and return the flattened feature
    /// count fed into the first dense layer.
    pub fn validate(&self) -> Result<usize> {
        if self.conv_filters.is_empty() {
            return Err(ModelError::InvalidConfig("at least one conv block is required".into()));
        }
        if self.kernel_size % 2 == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "kernel_size must be odd for same padding, got {}",
                self.kernel_size
            )));
        }
        if self.conv_filters.iter().chain(&self.dense_units).any(|&u| u == 0) {
            return Err(ModelError::InvalidConfig("layer widths must be positive".into()));
        }

        let (mut h, mut w) = (self.input.gene_len, self.input.mirna_len);
        for block in 0..self.conv_filters.len() {
            if h < 2 || w < 2 {
                return Err(ModelError::InvalidConfig(format!(
                    "input {}x{} too small for pooling in conv block {}",
                    self.input.gene_len, self.input.mirna_len, block
                )));
            }
            h /= 2;
            w /= 2;
        }

        let last = *self.conv_filters.last().unwrap_or(&1);
        Ok(last * h * w)
    }
}
