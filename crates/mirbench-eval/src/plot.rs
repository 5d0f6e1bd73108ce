//! Precision-recall chart using plotters (SVG output).
//!
//! Uses the SVG backend to avoid system font dependencies.

use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use crate::report::{EvalReport, MethodOutcome};

/// Render every method of `report` onto one recall/precision chart.
/// Returns the path actually written (`.png` is swapped for `.svg`).
pub fn render_pr_chart(path: &Path, report: &EvalReport, title: &str, size: (u32, u32)) -> Result<PathBuf> {
    let svg_path = if path.extension().map(|e| e == "png").unwrap_or(false) {
        path.with_extension("svg")
    } else {
        path.to_path_buf()
    };

    {
        let root = SVGBackend::new(&svg_path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

        chart
            .configure_mesh()
            .x_desc("Recall")
            .y_desc("Precision")
            .x_labels(6)
            .y_labels(6)
            .draw()?;

        for method in &report.methods {
            let color = parse_hex_color(&method.color).unwrap_or(BLACK);
            match &method.outcome {
                MethodOutcome::Curve { auc, curve } => {
                    chart
                        .draw_series(LineSeries::new(curve.plot_points(), color.stroke_width(2)))?
                        .label(format!("{} (AUC {:.3})", method.name, auc))
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
                }
                MethodOutcome::OperatingPoint(op) => {
                    chart
                        .draw_series(std::iter::once(Circle::new(
                            (op.recall, op.precision),
                            5,
                            color.filled(),
                        )))?
                        .label(method.name.clone())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }
    info!("PR chart written to {:?}", svg_path);
    Ok(svg_path)
}

/// Parse `#rrggbb` into a plotters colour.
pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
