//! Predictor abstraction: anything that maps an interaction batch to one
//! binding score per record.

use std::path::Path;

use mirbench_common::MirbenchError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{CnnPredictor, InteractionBatch, ModelError, Result};

/// Scores an interaction batch. Higher means more likely to bind.
pub trait BindingPredictor {
    /// Display name used in logs and reports.
    fn name(&self) -> &str;

    /// One score per record of `batch`, in batch order.
    fn predict(&self, batch: &InteractionBatch) -> Result<Vec<f64>>;
}

/// How a configured model is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Directory with `config.json` and `model.safetensors`.
    Cnn,
    /// Text file of precomputed scores, one per line.
    Scores,
}

/// Load a predictor of the given kind.
pub async fn load_predictor(
    name: &str,
    kind: ModelKind,
    path: impl AsRef<Path>,
    batch_size: usize,
    use_gpu: bool,
) -> Result<Box<dyn BindingPredictor>> {
    Ok(match kind {
        ModelKind::Cnn => Box::new(CnnPredictor::load(name, path, batch_size, use_gpu).await?),
        ModelKind::Scores => Box::new(ScoreFilePredictor::load(name, path).await?),
    })
}

// ---------------------------------------------------------------------------
// Precomputed scores
// ---------------------------------------------------------------------------

/// Replays scores produced outside mirbench, e.g. by the original training
/// framework, aligned with the test set order.
#[derive(Debug, Clone)]
pub struct ScoreFilePredictor {
    name: String,
    scores: Vec<f64>,
}

impl ScoreFilePredictor {
    pub fn new(name: impl Into<String>, scores: Vec<f64>) -> Self {
        Self { name: name.into(), scores }
    }

    pub async fn load(name: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading precomputed scores for {} from {:?}", name, path);

        let content = tokio::fs::read_to_string(path).await?;
        let source = path.display().to_string();
        let scores = parse_scores(&content, &source)?;

        info!("Loaded {} precomputed scores for {}", scores.len(), name);
        Ok(Self::new(name, scores))
    }
}

impl BindingPredictor for ScoreFilePredictor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, batch: &InteractionBatch) -> Result<Vec<f64>> {
        if self.scores.len() != batch.len() {
            return Err(ModelError::ShapeMismatch(format!(
                "{} has {} scores for a batch of {} records",
                self.name,
                self.scores.len(),
                batch.len()
            )));
        }
        Ok(self.scores.clone())
    }
}

fn parse_scores(content: &str, source: &str) -> Result<Vec<f64>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse::<f64>()
                .map_err(|_| {
                    ModelError::from(MirbenchError::parse(
                        source,
                        i + 1,
                        format!("invalid score {:?}", line.trim()),
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OneHotEncoder;
    use mirbench_test_utils::{synthetic_test_set, tempdir, write_fixture};

    #[test]
    fn test_parse_scores_skips_blank_lines() {
        let scores = parse_scores("0.9\n\n0.25\n  0.1  \n", "s.txt").unwrap();
        assert_eq!(scores, vec![0.9, 0.25, 0.1]);
    }

    #[test]
    fn test_parse_scores_reports_line() {
        let err = parse_scores("0.9\nhigh\n", "s.txt").unwrap_err();
        assert!(matches!(err, ModelError::Data(MirbenchError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_score_file_predictor_checks_length() {
        let (batch, _) = OneHotEncoder::default().encode(&synthetic_test_set().records).unwrap();

        let ok = ScoreFilePredictor::new("replay", vec![0.9, 0.8, 0.3, 0.1]);
        assert_eq!(ok.predict(&batch).unwrap(), vec![0.9, 0.8, 0.3, 0.1]);

        let short = ScoreFilePredictor::new("replay", vec![0.9]);
        assert!(matches!(short.predict(&batch), Err(ModelError::ShapeMismatch(_))));
    }

    #[test]
    fn test_load_predictor_from_score_file() {
        let dir = tempdir().unwrap();
        let path = write_fixture(dir.path(), "scores.txt", "0.1\n0.2\n0.3\n0.4\n");

        let predictor = tokio_test::block_on(load_predictor("replay", ModelKind::Scores, &path, 32, false)).unwrap();
        assert_eq!(predictor.name(), "replay");

        let (batch, _) = OneHotEncoder::default().encode(&synthetic_test_set().records).unwrap();
        assert_eq!(predictor.predict(&batch).unwrap(), vec![0.1, 0.2, 0.3, 0.4]);
    }
}
