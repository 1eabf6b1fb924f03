use crate::Result;

pub trait LossFn {
    /// Computes the loss of the predictions against the expected values.
    fn loss(&self, y: &[f64], y_pred: &[f64]) -> Result<f64>;

    /// Writes into `delta` the derivative of each sample's loss with respect to the logit that
    /// produced its prediction.
    fn loss_prime(&self, y: &[f64], y_pred: &[f64], delta: &mut [f64]) -> Result<()>;
}
