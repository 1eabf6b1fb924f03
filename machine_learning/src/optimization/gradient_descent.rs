use super::Optimizer;
use crate::{MlErr, Result};

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - Scales every step, validated by the caller's configuration.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Moves every parameter against its gradient: `p -= learning_rate * g`.
    fn update_params(&mut self, params: &mut [f64], grad: &[f64]) -> Result<()> {
        if params.len() != grad.len() {
            return Err(MlErr::SizeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: params.len(),
            });
        }

        let lr = self.learning_rate;
        params.iter_mut().zip(grad).for_each(|(p, g)| *p -= lr * g);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let mut params = [1.0, -2.0, 0.5];
        GradientDescent::new(0.5)
            .update_params(&mut params, &[2.0, -2.0, 0.0])
            .unwrap();

        assert_eq!(params, [0.0, -1.0, 0.5]);
    }

    #[test]
    fn rejects_mismatched_gradient() {
        let mut params = [1.0, 2.0];
        let err = GradientDescent::new(0.1)
            .update_params(&mut params, &[1.0])
            .unwrap_err();

        assert_eq!(
            err,
            MlErr::SizeMismatch {
                what: "gradient",
                got: 1,
                expected: 2
            }
        );
        assert_eq!(params, [1.0, 2.0]);
    }
}
