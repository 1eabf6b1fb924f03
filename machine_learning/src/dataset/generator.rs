use log::debug;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

use super::Dataset;
use crate::{MlErr, Result};

const DEFAULT_SEED: u64 = 42;

/// Parameters of the synthetic data generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    num_samples: usize,
    num_features: usize,
    weight_scale: f64,
    feature_scale: f64,
    seed: u64,
}

impl GenerationConfig {
    /// Creates a new generator configuration.
    ///
    /// # Args
    /// * `num_samples` - Amount of samples to generate.
    /// * `num_features` - Amount of features per sample.
    /// * `weight_scale` - Standard deviation of the hidden model's weights and bias.
    /// * `feature_scale` - Standard deviation of the features.
    /// * `seed` - Seed of the generator.
    ///
    /// # Returns
    /// A `GenerationConfig` or an error naming the first invalid field.
    pub fn new(
        num_samples: usize,
        num_features: usize,
        weight_scale: f64,
        feature_scale: f64,
        seed: u64,
    ) -> Result<Self> {
        if num_samples == 0 {
            return Err(MlErr::InvalidConfig {
                field: "num_samples",
                reason: "must be at least 1",
            });
        }
        if num_features == 0 {
            return Err(MlErr::InvalidConfig {
                field: "num_features",
                reason: "must be at least 1",
            });
        }

        for (field, scale) in [("weight_scale", weight_scale), ("feature_scale", feature_scale)] {
            if !scale.is_finite() || scale < 0.0 {
                return Err(MlErr::InvalidConfig {
                    field,
                    reason: "must be a finite non negative number",
                });
            }
        }

        Ok(Self {
            num_samples,
            num_features,
            weight_scale,
            feature_scale,
            seed,
        })
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for GenerationConfig {
    /// A million samples of 30 features with a fixed seed.
    fn default() -> Self {
        Self {
            num_samples: 1_000_000,
            num_features: 30,
            weight_scale: 1.0,
            feature_scale: 1.0,
            seed: DEFAULT_SEED,
        }
    }
}

/// Generates a binary classification dataset from a hidden logistic model.
///
/// The hidden weights and bias are drawn from `N(0, weight_scale²)` and every feature from
/// `N(0, feature_scale²)`. Each label is then sampled as `1` with probability
/// `1 / (1 + e^-(bias + w · x))`.
///
/// # Arguments
/// * `config` - The generator's parameters.
pub fn generate_synthetic(config: &GenerationConfig) -> Dataset {
    let GenerationConfig {
        num_samples,
        num_features,
        weight_scale,
        feature_scale,
        seed,
    } = *config;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut normal = |scale: f64| rng.sample::<f64, _>(StandardNormal) * scale;

    let true_weights: Vec<f64> = (0..num_features).map(|_| normal(weight_scale)).collect();
    let true_bias = normal(weight_scale);

    let mut x = Array2::zeros((num_samples, num_features));
    let mut y = Vec::with_capacity(num_samples);

    for mut row in x.rows_mut() {
        row.iter_mut()
            .for_each(|feature| *feature = rng.sample::<f64, _>(StandardNormal) * feature_scale);

        let z = row
            .iter()
            .zip(&true_weights)
            .fold(true_bias, |z, (x, w)| z + x * w);
        let probability = 1.0 / (1.0 + (-z).exp());

        let label = if rng.random::<f64>() < probability {
            1.0
        } else {
            0.0
        };
        y.push(label);
    }

    let positives = y.iter().filter(|&&y| y == 1.0).count();
    debug!(
        samples = num_samples,
        features = num_features,
        positives = positives;
        "generated synthetic dataset"
    );

    Dataset::from_parts(x, y)
}
