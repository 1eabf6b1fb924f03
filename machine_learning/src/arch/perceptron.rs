use ndarray::{ArrayView1, ArrayView2, Axis};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;

use super::Model;
use crate::{MlErr, Result, numeric, seed};

/// Standard deviation of the initial weights.
const INIT_SCALE: f64 = 0.01;

/// A single layer logistic perceptron: `sigmoid(bias + w · x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron {
    weights: Vec<f64>,
    bias: f64,
}

impl Perceptron {
    /// Creates a new `Perceptron` whose weights are seeded from the system clock.
    ///
    /// # Arguments
    /// * `num_features` - The amount of features of every input.
    pub fn new(num_features: usize) -> Self {
        Self::with_seed(num_features, seed::clock_seed())
    }

    /// Creates a new `Perceptron` with weights drawn from `N(0, 1) * 0.01` and a zero bias.
    ///
    /// # Arguments
    /// * `num_features` - The amount of features of every input.
    /// * `seed` - The seed for the weight initialization.
    pub fn with_seed(num_features: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = (0..num_features)
            .map(|_| rng.sample::<f64, _>(StandardNormal) * INIT_SCALE)
            .collect();

        Self { weights, bias: 0.0 }
    }

    /// Creates a new `Perceptron` from already known parameters.
    ///
    /// # Arguments
    /// * `weights` - One weight per feature.
    /// * `bias` - The bias term.
    pub fn from_params(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Computes `bias + w · x`.
    ///
    /// # Arguments
    /// * `x` - The sample's features.
    ///
    /// # Returns
    /// The logit or an error if `x` doesn't have one element per weight.
    pub fn logit(&self, x: ArrayView1<f64>) -> Result<f64> {
        self.check_features("features", x.len())?;
        Ok(self.logit_unchecked(x))
    }

    /// Gives mutable access to the weights and the bias, only the trainer updates them.
    pub(crate) fn params_mut(&mut self) -> (&mut [f64], &mut f64) {
        (&mut self.weights, &mut self.bias)
    }

    fn logit_unchecked(&self, x: ArrayView1<f64>) -> f64 {
        x.iter()
            .zip(&self.weights)
            .fold(self.bias, |z, (x, w)| z + x * w)
    }

    fn check_features(&self, what: &'static str, got: usize) -> Result<()> {
        let expected = self.weights.len();

        if got != expected {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected,
            });
        }

        Ok(())
    }
}

impl Model for Perceptron {
    fn num_features(&self) -> usize {
        self.weights.len()
    }

    fn predict(&self, x: ArrayView1<f64>) -> Result<f64> {
        self.logit(x).map(numeric::sigmoid)
    }

    fn predict_batch(&self, x: ArrayView2<f64>) -> Result<Vec<f64>> {
        self.check_features("batch columns", x.ncols())?;

        let predictions = x
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| numeric::sigmoid(self.logit_unchecked(row)))
            .collect();

        Ok(predictions)
    }
}
