use super::LossFn;
use crate::{MlErr, Result, numeric};

/// Binary cross-entropy loss function, paired with a sigmoid output.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Returns a new `CrossEntropy`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for CrossEntropy {
    fn loss(&self, y: &[f64], y_pred: &[f64]) -> Result<f64> {
        numeric::cross_entropy(y, y_pred)
    }

    /// For a sigmoid output the derivative with respect to the logit simplifies to `p - y`.
    fn loss_prime(&self, y: &[f64], y_pred: &[f64], delta: &mut [f64]) -> Result<()> {
        for (what, got) in [("predictions", y_pred.len()), ("delta", delta.len())] {
            if got != y.len() {
                return Err(MlErr::SizeMismatch {
                    what,
                    got,
                    expected: y.len(),
                });
            }
        }

        for ((d, y), p) in delta.iter_mut().zip(y).zip(y_pred) {
            *d = p - y;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_prime_is_prediction_minus_label() {
        let mut delta = [0.0; 3];
        CrossEntropy
            .loss_prime(&[1.0, 0.0, 1.0], &[0.25, 0.5, 1.0], &mut delta)
            .unwrap();

        assert_eq!(delta, [-0.75, 0.5, 0.0]);
    }

    #[test]
    fn loss_prime_rejects_short_buffer() {
        let mut delta = [0.0; 1];
        let err = CrossEntropy
            .loss_prime(&[1.0, 0.0], &[0.5, 0.5], &mut delta)
            .unwrap_err();

        assert_eq!(
            err,
            MlErr::SizeMismatch {
                what: "delta",
                got: 1,
                expected: 2
            }
        );
    }
}
