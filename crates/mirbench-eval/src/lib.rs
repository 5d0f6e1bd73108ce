//! mirbench-eval — Runs every configured binding predictor against one test
//! set and reports precision-recall results.

pub mod config;
pub mod pipeline;
pub mod plot;
pub mod report;

pub use config::EvalConfig;
pub use pipeline::run;
pub use report::{EvalReport, MethodOutcome, MethodResult};
