use std::{fs, path::Path};

use anyhow::{Context, Result};
use machine_learning::{
    dataset::{GenerationConfig, SplitConfig},
    metrics::MetricsConfig,
    training::TrainingConfig,
};
use serde::Deserialize;

/// Everything a run of the binary can be configured with.
///
/// Any field missing from the JSON file takes its default value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub seed: Option<u64>,
    pub generation: GenerationSection,
    pub split: SplitSection,
    pub training: TrainingSection,
    pub metrics: MetricsSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSection {
    pub num_samples: usize,
    pub num_features: usize,
    pub weight_scale: f64,
    pub feature_scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitSection {
    pub train_ratio: f64,
    pub shuffle: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingSection {
    pub learning_rate: f64,
    pub epochs: usize,
    pub log_every: usize,
    pub early_stop_delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsSection {
    pub threshold: f64,
    pub extended: bool,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            num_samples: 10_000,
            num_features: 30,
            weight_scale: 1.0,
            feature_scale: 1.0,
        }
    }
}

impl Default for SplitSection {
    fn default() -> Self {
        Self {
            train_ratio: 0.8,
            shuffle: true,
        }
    }
}

impl Default for TrainingSection {
    fn default() -> Self {
        let defaults = TrainingConfig::default();

        Self {
            learning_rate: defaults.learning_rate(),
            epochs: defaults.epochs(),
            log_every: defaults.log_every(),
            early_stop_delta: defaults.early_stop_delta(),
        }
    }
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            extended: true,
        }
    }
}

impl RunConfig {
    /// Reads a run configuration from a JSON file.
    ///
    /// # Errors
    /// Fails if the file can't be read or isn't a valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;

        Self::from_json(&content).with_context(|| format!("invalid config '{}'", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn generation(&self, seed: u64) -> Result<GenerationConfig> {
        let GenerationSection {
            num_samples,
            num_features,
            weight_scale,
            feature_scale,
        } = self.generation;

        Ok(GenerationConfig::new(
            num_samples,
            num_features,
            weight_scale,
            feature_scale,
            seed,
        )?)
    }

    pub fn split(&self, seed: u64) -> Result<SplitConfig> {
        Ok(SplitConfig::new(
            self.split.train_ratio,
            self.split.shuffle,
            seed,
        )?)
    }

    pub fn training(&self) -> Result<TrainingConfig> {
        let TrainingSection {
            learning_rate,
            epochs,
            log_every,
            early_stop_delta,
        } = self.training;

        Ok(TrainingConfig::new(
            learning_rate,
            epochs,
            log_every,
            early_stop_delta,
        )?)
    }

    pub fn metrics(&self) -> Result<MetricsConfig> {
        Ok(MetricsConfig::new(
            self.metrics.threshold,
            self.metrics.extended,
        )?)
    }
}
