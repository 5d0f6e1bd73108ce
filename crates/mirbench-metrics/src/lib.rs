//! mirbench-metrics — Precision-recall evaluation and the seed-match baseline.

pub mod pr;
pub mod seed;

pub use pr::{precision_recall_curve, PrCurve, PrPoint};
pub use seed::{seed_match, seed_operating_point, OperatingPoint};
