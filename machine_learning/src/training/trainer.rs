use log::{debug, info};

use super::{Progress, StopReason, TrainReport, TrainingConfig};
use crate::{
    MlErr, Result,
    arch::{
        Model, Perceptron,
        loss::{CrossEntropy, LossFn},
    },
    dataset::Dataset,
    optimization::{GradientDescent, Optimizer},
};

/// Full batch gradient descent over a `Perceptron`, with early stopping.
///
/// The trainer keeps no state between runs, everything it changes lives in the model it is given.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    loss_fn: CrossEntropy,
}

impl Trainer {
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `config` - The hyperparameters of every run.
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            loss_fn: CrossEntropy::new(),
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains `model` on `dataset`, discarding progress observations.
    ///
    /// See [`Trainer::train_with`].
    pub fn train(&self, model: &mut Perceptron, dataset: &Dataset) -> Result<TrainReport> {
        self.train_with(model, dataset, |_| {})
    }

    /// Trains `model` on `dataset` in place.
    ///
    /// Each epoch predicts the whole dataset, computes the cross-entropy loss and, unless the
    /// improvement over the previous epoch is under the early stop delta, updates every weight
    /// and the bias from that single prediction snapshot. When training stops early the model
    /// keeps the parameters of the previous epoch.
    ///
    /// # Arguments
    /// * `model` - The model to train.
    /// * `dataset` - The training samples, with as many features as the model.
    /// * `on_progress` - Called with the epoch and its loss every `log_every` epochs.
    ///
    /// # Returns
    /// The run's report, or an error if the dataset is empty or its feature count doesn't match
    /// the model's.
    pub fn train_with<F>(
        &self,
        model: &mut Perceptron,
        dataset: &Dataset,
        mut on_progress: F,
    ) -> Result<TrainReport>
    where
        F: FnMut(Progress),
    {
        if dataset.num_features() != model.num_features() {
            return Err(MlErr::SizeMismatch {
                what: "dataset features",
                got: dataset.num_features(),
                expected: model.num_features(),
            });
        }
        if dataset.is_empty() {
            return Err(MlErr::Empty { what: "dataset" });
        }

        let x = dataset.features();
        let y = dataset.labels();
        let n = dataset.len() as f64;

        let epochs = self.config.epochs();
        let log_every = self.config.log_every();
        let threshold = self.config.early_stop_delta();
        let mut optimizer = GradientDescent::new(self.config.learning_rate());

        let mut delta = vec![0.0; dataset.len()];
        let mut grad_w = vec![0.0; model.num_features()];
        let mut losses = Vec::with_capacity(epochs);
        let mut prev_loss = 0.0;

        for epoch in 0..epochs {
            let predictions = model.predict_batch(x)?;
            let loss = self.loss_fn.loss(y, &predictions)?;
            losses.push(loss);

            if epoch > 0 {
                let improvement = prev_loss - loss;

                if improvement < threshold {
                    info!(
                        epoch = epoch,
                        improvement = improvement,
                        threshold = threshold;
                        "early stopping"
                    );

                    let stop = StopReason::EarlyStop {
                        epoch,
                        delta: improvement,
                    };
                    return Ok(TrainReport::new(stop, losses));
                }
            }
            prev_loss = loss;

            self.loss_fn.loss_prime(y, &predictions, &mut delta)?;

            for (j, g) in grad_w.iter_mut().enumerate() {
                let sum: f64 = delta.iter().zip(x.column(j)).map(|(d, x)| d * x).sum();
                *g = sum / n;
            }
            let grad_b = delta.iter().sum::<f64>() / n;

            let (weights, bias) = model.params_mut();
            optimizer.update_params(weights, &grad_w)?;
            optimizer.update_params(std::slice::from_mut(bias), &[grad_b])?;

            if epoch % log_every == 0 {
                info!(epoch = epoch, loss = loss; "training progress");
                on_progress(Progress { epoch, loss });
            }
        }

        debug!(epochs = epochs; "reached the epoch cap");
        Ok(TrainReport::new(StopReason::EpochCap, losses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_dataset() -> Dataset {
        Dataset::from_rows(
            &[vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]],
            vec![0.0, 0.0, 1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn single_epoch_matches_hand_computed_update() {
        let dataset = toy_dataset();
        let mut model = Perceptron::from_params(vec![0.0], 0.0);
        let config = TrainingConfig::new(0.5, 1, 1, 0.0).unwrap();

        let report = Trainer::new(config).train(&mut model, &dataset).unwrap();

        // every prediction is 0.5, so grad_w = mean((0.5 - y) * x) = -0.75 and grad_b = 0
        assert_eq!(report.stop(), StopReason::EpochCap);
        assert_eq!(report.updates(), 1);
        assert!((model.weights()[0] - 0.375).abs() < 1e-15);
        assert_eq!(model.bias(), 0.0);
        assert!((report.losses()[0] - std::f64::consts::LN_2).abs() < 1e-9);
    }

    #[test]
    fn reports_progress_every_log_every_epochs() {
        let dataset = toy_dataset();
        let mut model = Perceptron::from_params(vec![0.0], 0.0);
        let config = TrainingConfig::new(0.1, 10, 3, 0.0).unwrap();

        let mut seen = Vec::new();
        let report = Trainer::new(config)
            .train_with(&mut model, &dataset, |p| seen.push(p))
            .unwrap();

        let epochs: Vec<_> = seen.iter().map(|p| p.epoch).collect();
        assert_eq!(epochs, [0, 3, 6, 9]);
        for p in seen {
            assert_eq!(p.loss, report.losses()[p.epoch]);
        }
    }

    #[test]
    fn early_stop_keeps_previous_parameters() {
        let dataset = toy_dataset();
        let config = TrainingConfig::new(0.5, 50, 1, 10.0).unwrap();

        let mut model = Perceptron::from_params(vec![0.0], 0.0);
        let report = Trainer::new(config).train(&mut model, &dataset).unwrap();

        let mut one_epoch = Perceptron::from_params(vec![0.0], 0.0);
        let config = TrainingConfig::new(0.5, 1, 1, 0.0).unwrap();
        Trainer::new(config).train(&mut one_epoch, &dataset).unwrap();

        let StopReason::EarlyStop { epoch, delta } = report.stop() else {
            panic!("expected an early stop, got {:?}", report.stop());
        };
        assert_eq!(epoch, 1);
        assert!(delta < 10.0);
        assert_eq!(delta, report.losses()[0] - report.losses()[1]);
        assert_eq!(report.updates(), 1);
        assert_eq!(model, one_epoch);
    }

    #[test]
    fn loss_increase_stops_with_zero_delta() {
        // a constant feature with both labels, the optimum predicts 0.5 and lr 50 jumps past it
        let dataset = Dataset::from_rows(&[vec![1.0], vec![1.0]], vec![0.0, 1.0]).unwrap();
        let config = TrainingConfig::new(50.0, 10, 1, 0.0).unwrap();

        let mut model = Perceptron::from_params(vec![1.0], 0.0);
        let report = Trainer::new(config).train(&mut model, &dataset).unwrap();

        let mut one_epoch = Perceptron::from_params(vec![1.0], 0.0);
        let config = TrainingConfig::new(50.0, 1, 1, 0.0).unwrap();
        Trainer::new(config).train(&mut one_epoch, &dataset).unwrap();

        let StopReason::EarlyStop { epoch, delta } = report.stop() else {
            panic!("expected an early stop, got {:?}", report.stop());
        };
        assert_eq!(epoch, 1);
        assert!(delta < 0.0, "delta: {delta}");
        assert!(report.losses()[1] > report.losses()[0]);
        assert_eq!(model, one_epoch);
    }

    #[test]
    fn rejects_feature_mismatch() {
        let dataset = toy_dataset();
        let mut model = Perceptron::from_params(vec![0.0, 0.0], 0.0);
        let trainer = Trainer::new(TrainingConfig::default());

        let err = trainer.train(&mut model, &dataset).unwrap_err();
        assert_eq!(
            err,
            MlErr::SizeMismatch {
                what: "dataset features",
                got: 1,
                expected: 2
            }
        );
        assert_eq!(model, Perceptron::from_params(vec![0.0, 0.0], 0.0));
    }

    #[test]
    fn rejects_empty_dataset() {
        let dataset = Dataset::from_rows(&[], vec![]).unwrap();
        let mut model = Perceptron::from_params(vec![], 0.0);
        let trainer = Trainer::new(TrainingConfig::default());

        assert_eq!(
            trainer.train(&mut model, &dataset).unwrap_err(),
            MlErr::Empty { what: "dataset" }
        );
    }
}
