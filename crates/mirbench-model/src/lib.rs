//! mirbench-model
//!
//! Turns (gene, miRNA) pairs into fixed-shape Watson–Crick interaction
//! tensors and scores them with binding predictors.
//!
//! # Features
//! - Deterministic one-hot interaction encoding with an explicit length policy
//! - Candle CNN predictor loaded from `config.json` + `model.safetensors`
//! - Precomputed-score predictor for models scored elsewhere
//! - GPU support (CUDA, Metal) with automatic fallback to CPU
//!
//! # Example
//! ```rust,no_run
//! use mirbench_common::TestRecord;
//! use mirbench_model::{BindingPredictor, CnnPredictor, OneHotEncoder};
//!
//! #[tokio::main]
//! async fn main() -> mirbench_model::Result<()> {
//!     let records = vec![TestRecord::new("ACGTACGTTACACG", "ACGTGTACGTAGCT", 1)];
//!     let (batch, _stats) = OneHotEncoder::default().encode(&records)?;
//!
//!     let model = CnnPredictor::load("miRBind1", "models/model_1_1", 256, false).await?;
//!     let scores = model.predict(&batch)?;
//!     println!("binding probability: {:.3}", scores[0]);
//!     Ok(())
//! }
//! ```

pub mod cnn;
pub mod config;
pub mod encoder;
pub mod error;
pub mod predictor;

pub use cnn::CnnPredictor;
pub use config::{CnnConfig, TensorShape};
pub use encoder::{EncodingStats, InteractionBatch, LengthPolicy, OneHotEncoder};
pub use error::{ModelError, Result};
pub use predictor::{load_predictor, BindingPredictor, ModelKind, ScoreFilePredictor};
