use crate::Result;

/// An update rule for a flat slice of parameters.
pub trait Optimizer {
    /// Takes one step over `params` given their gradient, element by element.
    ///
    /// # Returns
    /// An error if `grad` and `params` differ in length, in which case nothing is modified.
    fn update_params(&mut self, params: &mut [f64], grad: &[f64]) -> Result<()>;
}
