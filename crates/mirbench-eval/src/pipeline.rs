//! Evaluation pipeline: load the test set, score it with every configured
//! method, and collect precision-recall results.

use anyhow::{Context, Result};
use mirbench_common::{LabeledScores, TestSet};
use mirbench_metrics::{seed_operating_point, PrCurve};
use mirbench_model::{load_predictor, OneHotEncoder};
use mirbench_sources::{load_cofold, load_rna22, load_test_set, ExpectedCounts};
use tracing::{info, warn};

use crate::config::{EvalConfig, COFOLD_COLOR, RNA22_COLOR, SEED_COLOR};
use crate::plot::render_pr_chart;
use crate::report::{EvalReport, MethodOutcome, MethodResult};

/// Run the whole comparison described by `config`.
///
/// Methods are reported in a fixed order: models as configured, then
/// cofold, RNA22 and the seed rule. Sections missing from the config are
/// skipped. The JSON report and chart are written when output paths are set.
pub async fn run(config: &EvalConfig) -> Result<EvalReport> {
    let test_set = load_test_set(&config.test_set)
        .await
        .with_context(|| format!("Failed to load test set {}", config.test_set.display()))?;
    let labels = test_set.labels();

    let encoder = OneHotEncoder::new(config.tensor.shape(), config.tensor.length_policy);
    let (batch, encoding) = encoder
        .encode(&test_set.records)
        .context("Failed to encode test set")?;

    let mut methods = Vec::new();

    for (i, model_cfg) in config.models.iter().enumerate() {
        let predictor = load_predictor(
            &model_cfg.name,
            model_cfg.kind,
            &model_cfg.path,
            model_cfg.batch_size,
            config.use_gpu,
        )
        .await
        .with_context(|| format!("Failed to load model {} from {}", model_cfg.name, model_cfg.path.display()))?;

        let scores = predictor
            .predict(&batch)
            .with_context(|| format!("Inference failed for {}", model_cfg.name))?;
        let scored = LabeledScores::new(labels.clone(), scores)?;
        methods.push(curve_result(&model_cfg.name, config.model_color(i), &scored)?);
    }

    if let Some(cofold_cfg) = &config.cofold {
        let cofold = load_cofold(&cofold_cfg.path)
            .await
            .with_context(|| format!("Failed to load cofold energies {}", cofold_cfg.path.display()))?;
        check_aligned(&cofold_cfg.label, cofold.len(), &test_set)?;

        let scored = LabeledScores::new(labels.clone(), cofold.normalized)?;
        let color = cofold_cfg.color.clone().unwrap_or_else(|| COFOLD_COLOR.to_string());
        methods.push(curve_result(&cofold_cfg.label, color, &scored)?);
    }

    if let Some(rna22_cfg) = &config.rna22 {
        let expected = ExpectedCounts::new(
            rna22_cfg.positive_count.unwrap_or_else(|| test_set.positive_count()),
            rna22_cfg.negative_count.unwrap_or_else(|| test_set.negative_count()),
        );
        if expected.total() != test_set.len() {
            warn!(
                "{} expects {} pairs but the test set has {}",
                rna22_cfg.label,
                expected.total(),
                test_set.len()
            );
        }

        let scored = load_rna22(&rna22_cfg.path, expected)
            .await
            .with_context(|| format!("Failed to load RNA22 predictions {}", rna22_cfg.path.display()))?;
        let color = rna22_cfg.color.clone().unwrap_or_else(|| RNA22_COLOR.to_string());
        methods.push(curve_result(&rna22_cfg.label, color, &scored)?);
    }

    if config.seed.enabled {
        let op = seed_operating_point(&test_set.records).context("Seed matching failed")?;
        info!("{} sens, prec: {:.4} {:.4}", config.seed.label, op.recall, op.precision);
        methods.push(MethodResult {
            name: config.seed.label.clone(),
            color: config.seed.color.clone().unwrap_or_else(|| SEED_COLOR.to_string()),
            outcome: MethodOutcome::OperatingPoint(op),
        });
    }

    let report = EvalReport {
        test_set: config.test_set.display().to_string(),
        dataset_ratio: config.dataset_ratio.clone(),
        records: test_set.len(),
        positives: test_set.positive_count(),
        negatives: test_set.negative_count(),
        encoding,
        methods,
    };

    if let Some(path) = &config.output.report {
        report.write_json(path).await?;
        info!("Report written to {:?}", path);
    }
    if let Some(path) = &config.output.chart {
        render_pr_chart(
            path,
            &report,
            &config.chart_title(),
            (config.output.width, config.output.height),
        )
        .with_context(|| format!("Failed to render chart {}", path.display()))?;
    }

    Ok(report)
}

fn curve_result(name: &str, color: String, scored: &LabeledScores) -> Result<MethodResult> {
    let curve = PrCurve::from_scores(scored).with_context(|| format!("PR curve failed for {}", name))?;
    let auc = curve.auc();
    info!("{} auc {:.4}", name, auc);
    Ok(MethodResult {
        name: name.to_string(),
        color,
        outcome: MethodOutcome::Curve { auc, curve },
    })
}

fn check_aligned(name: &str, scores: usize, test_set: &TestSet) -> Result<()> {
    if scores != test_set.len() {
        anyhow::bail!(
            "{} has {} records but the test set has {}",
            name,
            scores,
            test_set.len()
        );
    }
    Ok(())
}
