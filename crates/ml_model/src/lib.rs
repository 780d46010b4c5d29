//! ML model crate for diabetes risk prediction.
//!
//! This crate wraps a pre-trained feedforward classifier built with the
//! Burn deep learning framework. The model takes the eight screening
//! metrics as input and outputs the probability of the positive
//! (diabetic) class; training happens elsewhere, only inference against a
//! serialized checkpoint is performed here.

use std::path::Path;

use anyhow::Context;
use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;
use burn::record::CompactRecorder;
use burn::tensor::activation::sigmoid;
use screening_structs::{FIELD_COUNT, FeatureVector, Outcome, PredictionResult};

/// Configuration for the screening model architecture.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Number of hidden units in the first layer.
    pub hidden_size_1: usize,
    /// Number of hidden units in the second layer.
    pub hidden_size_2: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            hidden_size_1: 24,
            hidden_size_2: 12,
        }
    }
}

/// The diabetes screening model.
///
/// A small feedforward network over the eight metric inputs with a single
/// output logit for the positive class.
#[derive(Module, Debug)]
pub struct ScreeningModel<B: Backend> {
    linear1: Linear<B>,
    linear2: Linear<B>,
    linear_out: Linear<B>,
    activation: Relu,
}

impl<B: Backend> ScreeningModel<B> {
    /// Creates a new screening model with the given configuration.
    pub fn new(device: &B::Device, config: &ModelConfig) -> Self {
        let linear1 = LinearConfig::new(FIELD_COUNT, config.hidden_size_1).init(device);
        let linear2 = LinearConfig::new(config.hidden_size_1, config.hidden_size_2).init(device);
        let linear_out = LinearConfig::new(config.hidden_size_2, 1).init(device);
        let activation = Relu::new();

        Self {
            linear1,
            linear2,
            linear_out,
            activation,
        }
    }

    /// Forward pass through the network.
    ///
    /// # Arguments
    ///
    /// * `input` - Tensor of shape [`batch_size`, [`FIELD_COUNT`]]
    ///
    /// # Returns
    ///
    /// Tensor of shape [`batch_size`, 1] containing positive-class logits.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.linear1.forward(input);
        let x = self.activation.forward(x);
        let x = self.linear2.forward(x);
        let x = self.activation.forward(x);
        self.linear_out.forward(x)
    }
}

/// Predicts the outcome for a single feature vector.
///
/// The probability is the model's estimated likelihood of the positive
/// class; the outcome is [`Outcome::Diabetic`] iff the discrete class
/// output is the positive label. Pure in its inputs: the same model and
/// vector always produce the same result.
pub fn predict<B: Backend>(
    model: &ScreeningModel<B>,
    vector: &FeatureVector,
    device: &B::Device,
) -> PredictionResult {
    let input = Tensor::<B, 1>::from_floats(vector.to_f32().as_slice(), device).unsqueeze();
    let probabilities = sigmoid(model.forward(input));

    let probability: f64 = probabilities
        .into_data()
        .to_vec::<f32>()
        .unwrap_or_else(|_| vec![0.0])
        .first()
        .copied()
        .unwrap_or(0.0)
        .into();

    PredictionResult {
        outcome: Outcome::from_probability(probability),
        probability,
    }
}

/// Scores a batch of feature vectors in a single forward pass.
///
/// Row `i` of the result corresponds to `vectors[i]` and agrees with
/// [`predict`] on that vector.
pub fn predict_batch<B: Backend>(
    model: &ScreeningModel<B>,
    vectors: &[FeatureVector],
    device: &B::Device,
) -> Vec<PredictionResult> {
    if vectors.is_empty() {
        return Vec::new();
    }

    let mut features_data = Vec::with_capacity(vectors.len() * FIELD_COUNT);
    for vector in vectors {
        features_data.extend_from_slice(&vector.to_f32());
    }

    let input = Tensor::<B, 1>::from_floats(features_data.as_slice(), device)
        .reshape([vectors.len(), FIELD_COUNT]);

    let probabilities = sigmoid(model.forward(input))
        .into_data()
        .to_vec::<f32>()
        .unwrap_or_else(|_| vec![0.0; vectors.len()]);

    probabilities
        .into_iter()
        .map(|p| {
            let probability = f64::from(p);
            PredictionResult {
                outcome: Outcome::from_probability(probability),
                probability,
            }
        })
        .collect()
}

/// Saves the model checkpoint to disk.
///
/// The recorder appends its own `.mpk` extension to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_checkpoint<B: Backend>(model: ScreeningModel<B>, path: &Path) -> anyhow::Result<()> {
    model
        .save_file(path, &CompactRecorder::new())
        .with_context(|| format!("Failed to save model checkpoint to {}", path.display()))
}

/// Loads a model checkpoint from disk.
///
/// A load failure disables prediction capability but is recoverable by the
/// caller; it never terminates the process.
///
/// # Errors
///
/// Returns an error if the checkpoint is missing or cannot be deserialized.
pub fn load_checkpoint<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> anyhow::Result<ScreeningModel<B>> {
    ScreeningModel::new(device, &ModelConfig::default())
        .load_file(path, &CompactRecorder::new(), device)
        .with_context(|| format!("Failed to load model checkpoint from {}", path.display()))
}
