//! Interaction CNN predictor using Candle.

use std::path::Path;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, Module, VarBuilder};
use tracing::{debug, info};

use crate::predictor::BindingPredictor;
use crate::{CnnConfig, InteractionBatch, ModelError, Result};

/// Architecture file inside a model directory.
pub const CONFIG_FILE: &str = "config.json";

/// Weights file inside a model directory.
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// Binary classifier over `(N, gene_len, mirna_len, 1)` interaction tensors.
///
/// Weight names: `conv{i}.weight`/`conv{i}.bias` per conv block,
/// `dense{i}.*` per hidden layer and `output.*` for the final unit. Features
/// are flattened in channel-major order.
pub struct CnnPredictor {
    name: String,
    config: CnnConfig,
    convs: Vec<Conv2d>,
    dense: Vec<Linear>,
    output: Linear,
    device: Device,
    batch_size: usize,
}

impl CnnPredictor {
    /// Load a model directory containing `config.json` and `model.safetensors`.
    pub async fn load(name: &str, dir: impl AsRef<Path>, batch_size: usize, use_gpu: bool) -> Result<Self> {
        let start = Instant::now();
        let dir = dir.as_ref();
        info!("Loading CNN model {} from {:?}", name, dir);

        let device = Self::select_device(use_gpu);
        debug!("Using device: {:?}", device);

        let config_content = tokio::fs::read_to_string(dir.join(CONFIG_FILE)).await?;
        let config: CnnConfig = serde_json::from_str(&config_content)?;

        let weights_path = dir.join(WEIGHTS_FILE);
        if !weights_path.exists() {
            return Err(ModelError::ModelLoad(format!("missing weights file {:?}", weights_path)));
        }

        let model_name = name.to_string();
        let model = tokio::task::spawn_blocking(move || {
            let vb = unsafe {
                VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                    .map_err(load_error)?
            };
            Self::from_var_builder(model_name, config, vb, device, batch_size)
        })
        .await
        .map_err(|e| ModelError::ModelLoad(e.to_string()))??;

        info!("{} loaded in {:?}", name, start.elapsed());
        Ok(model)
    }

    /// Build the network from any variable source.
    pub fn from_var_builder(
        name: impl Into<String>,
        config: CnnConfig,
        vb: VarBuilder,
        device: Device,
        batch_size: usize,
    ) -> Result<Self> {
        let flattened = config.validate()?;

        let conv_cfg = Conv2dConfig {
            padding: config.kernel_size / 2,
            ..Default::default()
        };

        let mut convs = Vec::with_capacity(config.conv_filters.len());
        let mut in_channels = 1;
        for (i, &filters) in config.conv_filters.iter().enumerate() {
            let conv = conv2d(in_channels, filters, config.kernel_size, conv_cfg, vb.pp(format!("conv{i}")))
                .map_err(load_error)?;
            convs.push(conv);
            in_channels = filters;
        }

        let mut dense = Vec::with_capacity(config.dense_units.len());
        let mut features = flattened;
        for (i, &units) in config.dense_units.iter().enumerate() {
            dense.push(linear(features, units, vb.pp(format!("dense{i}"))).map_err(load_error)?);
            features = units;
        }
        let output = linear(features, 1, vb.pp("output")).map_err(load_error)?;

        Ok(Self {
            name: name.into(),
            config,
            convs,
            dense,
            output,
            device,
            batch_size: batch_size.max(1),
        })
    }

    /// CUDA, then Metal, then CPU, depending on enabled features.
    fn select_device(use_gpu: bool) -> Device {
        if !use_gpu {
            return Device::Cpu;
        }

        #[cfg(feature = "cuda")]
        {
            match Device::new_cuda(0) {
                Ok(device) => {
                    info!("CUDA device available");
                    return device;
                }
                Err(e) => {
                    debug!("CUDA not available: {}, falling back", e);
                }
            }
        }

        #[cfg(feature = "metal")]
        {
            match Device::new_metal(0) {
                Ok(device) => {
                    info!("Metal device available");
                    return device;
                }
                Err(e) => {
                    debug!("Metal not available: {}, falling back to CPU", e);
                }
            }
        }

        debug!("No GPU backend enabled, using CPU");
        Device::Cpu
    }

    /// Whether inference runs on a GPU.
    pub fn is_gpu(&self) -> bool {
        matches!(self.device, Device::Cuda(_) | Device::Metal(_))
    }

    pub fn config(&self) -> &CnnConfig {
        &self.config
    }

    /// Sigmoid binding probabilities for an NHWC batch tensor.
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        // NHWC -> NCHW for conv2d
        let mut x = x.permute((0, 3, 1, 2))?.contiguous()?;
        for conv in &self.convs {
            x = conv.forward(&x)?.relu()?.max_pool2d(2)?;
        }

        let mut x = x.flatten_from(1)?;
        for layer in &self.dense {
            x = layer.forward(&x)?.relu()?;
        }

        candle_nn::ops::sigmoid(&self.output.forward(&x)?)?.squeeze(1)
    }
}

impl BindingPredictor for CnnPredictor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, batch: &InteractionBatch) -> Result<Vec<f64>> {
        if batch.shape() != self.config.input {
            return Err(ModelError::ShapeMismatch(format!(
                "{} expects {:?} tensors, batch has {:?}",
                self.name,
                self.config.input,
                batch.shape()
            )));
        }

        let start = Instant::now();
        let mut scores = Vec::with_capacity(batch.len());
        let mut offset = 0;
        while offset < batch.len() {
            let end = (offset + self.batch_size).min(batch.len());
            let x = batch.to_tensor_range(offset, end, &self.device)?;
            let probs = self.forward(&x)?.to_dtype(DType::F32)?.to_vec1::<f32>()?;
            scores.extend(probs.into_iter().map(f64::from));
            offset = end;
        }

        debug!("{} scored {} records in {:?}", self.name, scores.len(), start.elapsed());
        Ok(scores)
    }
}

fn load_error(e: candle_core::Error) -> ModelError {
    ModelError::ModelLoad(e.to_string())
}
