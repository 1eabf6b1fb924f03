use ndarray::{ArrayView1, ArrayView2};

use crate::Result;

/// A binary classifier that maps a feature vector to the probability of the positive class.
///
/// This is the only surface evaluation code relies on: outputs lie in `[0, 1]` and are monotonic
/// in the model's logit.
pub trait Model {
    /// Returns the amount of features each input must have.
    fn num_features(&self) -> usize;

    /// Computes the probability of the positive class for a single sample.
    ///
    /// # Arguments
    /// * `x` - The sample's features.
    ///
    /// # Returns
    /// The prediction or an error if `x` doesn't have `num_features` elements.
    fn predict(&self, x: ArrayView1<f64>) -> Result<f64>;

    /// Computes the probability of the positive class for every row of `x`.
    ///
    /// # Arguments
    /// * `x` - A matrix with one sample per row.
    ///
    /// # Returns
    /// The predictions in row order or an error if the amount of columns of `x` doesn't match
    /// `num_features`.
    fn predict_batch(&self, x: ArrayView2<f64>) -> Result<Vec<f64>>;
}
