//! Configuration loading for mirbench.
//! Reads mirbench.toml from the path given on the command line or in MIRBENCH_CONFIG.
//! Relative paths inside the file resolve against the file's directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use mirbench_model::{LengthPolicy, ModelKind, TensorShape};
use serde::{Deserialize, Serialize};

/// Line colours for models, in configuration order.
pub const MODEL_PALETTE: [&str; 3] = ["#00429d", "#73a2c6", "#a5d5d8"];
pub const COFOLD_COLOR: &str = "#f3b77d";
pub const RNA22_COLOR: &str = "#388294";
pub const SEED_COLOR: &str = "#de425b";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Tab-separated test set with `gene`, `miRNA` and `label` columns.
    pub test_set: PathBuf,
    /// Negative:positive ratio of the test set, used in the chart title.
    #[serde(default = "default_dataset_ratio")]
    pub dataset_ratio: String,
    #[serde(default)]
    pub use_gpu: bool,
    #[serde(default)]
    pub tensor: TensorConfig,
    #[serde(default)]
    pub models: Vec<ModelConfig>,
    pub cofold: Option<CofoldConfig>,
    pub rna22: Option<Rna22Config>,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_dataset_ratio() -> String { "1".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensorConfig {
    #[serde(default = "default_gene_len")]
    pub gene_len: usize,
    #[serde(default = "default_mirna_len")]
    pub mirna_len: usize,
    #[serde(default)]
    pub length_policy: LengthPolicy,
}

fn default_gene_len()  -> usize { 50 }
fn default_mirna_len() -> usize { 20 }

impl Default for TensorConfig {
    fn default() -> Self {
        Self {
            gene_len: default_gene_len(),
            mirna_len: default_mirna_len(),
            length_policy: LengthPolicy::default(),
        }
    }
}

impl TensorConfig {
    pub fn shape(&self) -> TensorShape {
        TensorShape::new(self.gene_len, self.mirna_len)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub path: PathBuf,
    #[serde(default = "default_model_kind")]
    pub kind: ModelKind,
    pub color: Option<String>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_model_kind() -> ModelKind { ModelKind::Cnn }
fn default_batch_size() -> usize     { 256 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CofoldConfig {
    pub path: PathBuf,
    #[serde(default = "default_cofold_label")]
    pub label: String,
    pub color: Option<String>,
}

fn default_cofold_label() -> String { "Cofold".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rna22Config {
    pub path: PathBuf,
    /// Positive pairs RNA22 was run on. Defaults to the test set's count.
    pub positive_count: Option<usize>,
    /// Negative pairs RNA22 was run on. Defaults to the test set's count.
    pub negative_count: Option<usize>,
    #[serde(default = "default_rna22_label")]
    pub label: String,
    pub color: Option<String>,
}

fn default_rna22_label() -> String { "RNA22".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default = "default_seed_label")]
    pub label: String,
    pub color: Option<String>,
}

fn bool_true()          -> bool   { true }
fn default_seed_label() -> String { "Seed".to_string() }

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            label: default_seed_label(),
            color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report destination.
    pub report: Option<PathBuf>,
    /// SVG chart destination (a `.png` extension is swapped for `.svg`).
    pub chart: Option<PathBuf>,
    pub title: Option<String>,
    #[serde(default = "default_chart_px")]
    pub width: u32,
    #[serde(default = "default_chart_px")]
    pub height: u32,
}

fn default_chart_px() -> u32 { 1000 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: None,
            chart: None,
            title: None,
            width: default_chart_px(),
            height: default_chart_px(),
        }
    }
}


impl EvalConfig {
    /// Load configuration from a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy mirbench.example.toml to mirbench.toml and edit it.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&content, base_dir)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse a TOML document, resolving relative paths against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> anyhow::Result<Self> {
        let mut config: EvalConfig = toml::from_str(content)?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };

        resolve(&mut self.test_set);
        self.models.iter_mut().for_each(|m| resolve(&mut m.path));
        if let Some(cofold) = self.cofold.as_mut() {
            resolve(&mut cofold.path);
        }
        if let Some(rna22) = self.rna22.as_mut() {
            resolve(&mut rna22.path);
        }
        if let Some(report) = self.output.report.as_mut() {
            resolve(report);
        }
        if let Some(chart) = self.output.chart.as_mut() {
            resolve(chart);
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tensor.gene_len == 0 || self.tensor.mirna_len == 0 {
            anyhow::bail!(
                "tensor dimensions must be positive, got {}x{}",
                self.tensor.gene_len,
                self.tensor.mirna_len
            );
        }
        for model in &self.models {
            if model.batch_size == 0 {
                anyhow::bail!("model {}: batch_size must be positive", model.name);
            }
        }
        Ok(())
    }

    /// Chart title, defaulting to `PR curve on 1:<ratio> test set`.
    pub fn chart_title(&self) -> String {
        self.output
            .title
            .clone()
            .unwrap_or_else(|| format!("PR curve on 1:{} test set", self.dataset_ratio))
    }

    /// Colour of the `index`-th configured model.
    pub fn model_color(&self, index: usize) -> String {
        self.models
            .get(index)
            .and_then(|m| m.color.clone())
            .unwrap_or_else(|| MODEL_PALETTE[index % MODEL_PALETTE.len()].to_string())
    }
}
