pub mod arch;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod numeric;
pub mod optimization;
pub mod seed;
pub mod training;

pub use error::{MlErr, Result};
