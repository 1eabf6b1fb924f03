//! Evaluation of a trained classifier on a labeled dataset.

use crate::{MlErr, Result, arch::Model, dataset::Dataset};

/// Parameters of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsConfig {
    threshold: f64,
    extended: bool,
}

impl MetricsConfig {
    /// Creates a new metrics configuration.
    ///
    /// # Args
    /// * `threshold` - Predictions strictly above it are classified as positive, in `[0, 1]`.
    /// * `extended` - Whether to compute precision, recall and F1.
    pub fn new(threshold: f64, extended: bool) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(MlErr::InvalidConfig {
                field: "threshold",
                reason: "must be between 0 and 1",
            });
        }

        Ok(Self {
            threshold,
            extended,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn extended(&self) -> bool {
        self.extended
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            extended: false,
        }
    }
}

/// Counts of every (true class, predicted class) combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    /// Percentage of correctly classified samples.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        100.0 * (self.true_negatives + self.true_positives) as f64 / total as f64
    }

    /// `TP / (TP + FP)`, zero when nothing was predicted positive.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `TP / (TP + FN)`, zero when there are no positive samples.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall.
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            return 0.0;
        }

        2.0 * p * r / (p + r)
    }

    /// The matrix as `[[TN, FP], [FN, TP]]`, indexed by `[true][predicted]`.
    pub fn as_array(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0;
    }

    num as f64 / den as f64
}

/// Precision, recall and F1 of the positive class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// The result of evaluating a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Percentage of correctly classified samples.
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    /// Only present when the configuration asks for it.
    pub extended: Option<ExtendedMetrics>,
}

/// Classifies every sample of `dataset` and counts the outcomes.
///
/// # Returns
/// The confusion matrix, or an error if the model rejects the dataset's features.
pub fn confusion_matrix<M: Model>(
    model: &M,
    dataset: &Dataset,
    config: &MetricsConfig,
) -> Result<ConfusionMatrix> {
    let predictions = model.predict_batch(dataset.features())?;
    let mut cm = ConfusionMatrix::default();

    for (p, y) in predictions.iter().zip(dataset.labels()) {
        let positive = *p > config.threshold;

        match (*y == 1.0, positive) {
            (false, false) => cm.true_negatives += 1,
            (false, true) => cm.false_positives += 1,
            (true, false) => cm.false_negatives += 1,
            (true, true) => cm.true_positives += 1,
        }
    }

    Ok(cm)
}

/// Percentage of samples of `dataset` the model classifies correctly.
pub fn accuracy<M: Model>(model: &M, dataset: &Dataset, config: &MetricsConfig) -> Result<f64> {
    if dataset.is_empty() {
        return Err(MlErr::Empty { what: "dataset" });
    }

    confusion_matrix(model, dataset, config).map(|cm| cm.accuracy())
}

/// Evaluates the model on `dataset`.
///
/// # Returns
/// The evaluation, or an error if the dataset is empty or doesn't match the model.
pub fn evaluate<M: Model>(
    model: &M,
    dataset: &Dataset,
    config: &MetricsConfig,
) -> Result<Evaluation> {
    if dataset.is_empty() {
        return Err(MlErr::Empty { what: "dataset" });
    }

    let confusion = confusion_matrix(model, dataset, config)?;
    let extended = config.extended.then(|| ExtendedMetrics {
        precision: confusion.precision(),
        recall: confusion.recall(),
        f1: confusion.f1(),
    });

    Ok(Evaluation {
        accuracy: confusion.accuracy(),
        confusion,
        extended,
    })
}
