//! Loads a CNN model directory written to disk and checks inference end to end.

use std::collections::HashMap;

use candle_core::{Device, Tensor};
use mirbench_common::TestRecord;
use mirbench_model::{
    load_predictor, BindingPredictor, CnnConfig, CnnPredictor, LengthPolicy, ModelError, ModelKind,
    OneHotEncoder, TensorShape,
};
use mirbench_test_utils::{tempdir, write_fixture};

fn zeros(shape: &[usize]) -> Tensor {
    Tensor::zeros(shape, candle_core::DType::F32, &Device::Cpu).unwrap()
}

/// Writes a tiny model whose output ignores the input: hidden biases
/// [1, -1, 2] pass through relu as [1, 0, 2] and are summed by the output unit.
fn write_model(dir: &std::path::Path) {
    let config = CnnConfig {
        input: TensorShape::new(6, 4),
        conv_filters: vec![2],
        kernel_size: 3,
        dense_units: vec![3],
    };
    write_fixture(dir, "config.json", &serde_json::to_string(&config).unwrap());

    let mut tensors: HashMap<String, Tensor> = HashMap::new();
    tensors.insert("conv0.weight".into(), zeros(&[2, 1, 3, 3]));
    tensors.insert("conv0.bias".into(), zeros(&[2]));
    tensors.insert("dense0.weight".into(), zeros(&[3, 12]));
    tensors.insert(
        "dense0.bias".into(),
        Tensor::new(&[1.0f32, -1.0, 2.0], &Device::Cpu).unwrap(),
    );
    tensors.insert(
        "output.weight".into(),
        Tensor::new(&[[1.0f32, 1.0, 1.0]], &Device::Cpu).unwrap(),
    );
    tensors.insert("output.bias".into(), zeros(&[1]));
    candle_core::safetensors::save(&tensors, dir.join("model.safetensors")).unwrap();
}

#[tokio::test]
async fn test_load_and_predict_from_directory() {
    let dir = tempdir().unwrap();
    write_model(dir.path());

    let model = CnnPredictor::load("tiny", dir.path(), 16, false).await.unwrap();
    assert_eq!(model.name(), "tiny");

    let encoder = OneHotEncoder::new(TensorShape::new(6, 4), LengthPolicy::Reject);
    let records = vec![
        TestRecord::new("ACGTAC", "TGCA", 1),
        TestRecord::new("GGGGGG", "CCCC", 0),
    ];
    let (batch, _) = encoder.encode(&records).unwrap();

    let expected = 1.0 / (1.0 + (-3.0f64).exp());
    let scores = model.predict(&batch).unwrap();
    assert_eq!(scores.len(), 2);
    for s in scores {
        assert!((s - expected).abs() < 1e-5, "score {s} != {expected}");
    }
}

#[tokio::test]
async fn test_load_predictor_dispatches_cnn() {
    let dir = tempdir().unwrap();
    write_model(dir.path());

    let model = load_predictor("tiny", ModelKind::Cnn, dir.path(), 4, false).await.unwrap();
    assert_eq!(model.name(), "tiny");
}

#[tokio::test]
async fn test_missing_weights_is_model_load_error() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path(), "config.json", r#"{"conv_filters": [4]}"#);

    let err = CnnPredictor::load("broken", dir.path(), 4, false).await.err().unwrap();
    assert!(matches!(err, ModelError::ModelLoad(_)));
}

/// Writes a 4x2 model with 1x1 kernels: channel 0 copies the interaction
/// map, channel 1 doubles it. After 2x2 pooling each channel holds one value
/// per gene half, flattened channel-major as [c0 top, c0 bottom, c1 top, c1 bottom].
fn write_position_model(dir: &std::path::Path) {
    let config = CnnConfig {
        input: TensorShape::new(4, 2),
        conv_filters: vec![2],
        kernel_size: 1,
        dense_units: vec![],
    };
    write_fixture(dir, "config.json", &serde_json::to_string(&config).unwrap());

    let mut tensors: HashMap<String, Tensor> = HashMap::new();
    tensors.insert(
        "conv0.weight".into(),
        Tensor::from_vec(vec![1.0f32, 2.0], (2, 1, 1, 1), &Device::Cpu).unwrap(),
    );
    tensors.insert("conv0.bias".into(), zeros(&[2]));
    tensors.insert(
        "output.weight".into(),
        Tensor::new(&[[1.0f32, -1.0, 1.0, -1.0]], &Device::Cpu).unwrap(),
    );
    tensors.insert("output.bias".into(), zeros(&[1]));
    candle_core::safetensors::save(&tensors, dir.join("model.safetensors")).unwrap();
}

#[tokio::test]
async fn test_prediction_depends_on_pairing_position() {
    let dir = tempdir().unwrap();
    write_position_model(dir.path());
    let model = CnnPredictor::load("position", dir.path(), 2, false).await.unwrap();
    assert!(!model.is_gpu());

    let encoder = OneHotEncoder::new(TensorShape::new(4, 2), LengthPolicy::Reject);
    let records = vec![
        // A pairs with T: top half of the gene binds
        TestRecord::new("AAGG", "TT", 1),
        // bottom half binds
        TestRecord::new("GGAA", "TT", 0),
        // nothing binds
        TestRecord::new("GGGG", "TT", 0),
    ];
    let (batch, _) = encoder.encode(&records).unwrap();
    let scores = model.predict(&batch).unwrap();

    let sigmoid = |x: f64| 1.0 / (1.0 + (-x).exp());
    // top: [1, 0, 2, 0] -> 1 + 2; bottom: [0, 1, 0, 2] -> -1 - 2
    let expected = [sigmoid(3.0), sigmoid(-3.0), 0.5];
    assert_eq!(scores.len(), 3);
    for (s, e) in scores.iter().zip(expected) {
        assert!((s - e).abs() < 1e-5, "score {s} != {e}");
    }
}
