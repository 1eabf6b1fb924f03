use std::num::NonZeroUsize;

use crate::{MlErr, Result};

const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(100).unwrap();
const DEFAULT_LOG_EVERY: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Immutable hyperparameters of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    learning_rate: f64,
    epochs: NonZeroUsize,
    log_every: NonZeroUsize,
    early_stop_delta: f64,
}

impl TrainingConfig {
    /// Creates a new training configuration.
    ///
    /// # Args
    /// * `learning_rate` - Step length of each gradient descent update, must be positive.
    /// * `epochs` - Maximum number of epochs, must be at least one.
    /// * `log_every` - Progress is reported every `log_every` epochs, must be at least one.
    /// * `early_stop_delta` - Minimum loss improvement between epochs to keep training, must not
    ///   be negative.
    ///
    /// # Returns
    /// A `TrainingConfig` or an error naming the first invalid field.
    pub fn new(
        learning_rate: f64,
        epochs: usize,
        log_every: usize,
        early_stop_delta: f64,
    ) -> Result<Self> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(MlErr::InvalidConfig {
                field: "learning_rate",
                reason: "must be a finite positive number",
            });
        }

        if !early_stop_delta.is_finite() || early_stop_delta < 0.0 {
            return Err(MlErr::InvalidConfig {
                field: "early_stop_delta",
                reason: "must be a finite non negative number",
            });
        }

        let epochs = NonZeroUsize::new(epochs).ok_or(MlErr::InvalidConfig {
            field: "epochs",
            reason: "must be at least 1",
        })?;

        let log_every = NonZeroUsize::new(log_every).ok_or(MlErr::InvalidConfig {
            field: "log_every",
            reason: "must be at least 1",
        })?;

        Ok(Self {
            learning_rate,
            epochs,
            log_every,
            early_stop_delta,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn epochs(&self) -> usize {
        self.epochs.get()
    }

    pub fn log_every(&self) -> usize {
        self.log_every.get()
    }

    pub fn early_stop_delta(&self) -> f64 {
        self.early_stop_delta
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: DEFAULT_EPOCHS,
            log_every: DEFAULT_LOG_EVERY,
            early_stop_delta: 0.0001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = TrainingConfig::default();

        assert_eq!(config.learning_rate(), 0.1);
        assert_eq!(config.epochs(), 100);
        assert_eq!(config.log_every(), 10);
        assert_eq!(config.early_stop_delta(), 0.0001);
    }

    #[test]
    fn accepts_zero_early_stop_delta() {
        assert!(TrainingConfig::new(0.5, 1, 1, 0.0).is_ok());
    }

    #[test]
    fn rejects_invalid_fields() {
        let cases = [
            (TrainingConfig::new(0.0, 10, 1, 0.0), "learning_rate"),
            (TrainingConfig::new(-0.1, 10, 1, 0.0), "learning_rate"),
            (TrainingConfig::new(f64::NAN, 10, 1, 0.0), "learning_rate"),
            (TrainingConfig::new(0.1, 0, 1, 0.0), "epochs"),
            (TrainingConfig::new(0.1, 10, 0, 0.0), "log_every"),
            (TrainingConfig::new(0.1, 10, 1, -1e-3), "early_stop_delta"),
            (TrainingConfig::new(0.1, 10, 1, f64::INFINITY), "early_stop_delta"),
        ];

        for (result, expected) in cases {
            match result {
                Err(MlErr::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected an invalid {expected}, got {other:?}"),
            }
        }
    }
}
