use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Empty {
        what: &'static str,
    },
    InvalidLabel {
        index: usize,
        value: f64,
    },
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => format!("There's a size mismatch for {what}, got {got} and expected {expected}"),
            MlErr::Empty { what } => format!("Expected at least one element in {what}"),
            MlErr::InvalidLabel { index, value } => {
                format!("The label at index {index} is {value}, labels must be either 0 or 1")
            }
            MlErr::InvalidConfig { field, reason } => {
                format!("Invalid configuration value for {field}: {reason}")
            }
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}
