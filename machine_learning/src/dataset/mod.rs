mod dataset;
mod generator;
mod split;

pub use dataset::Dataset;
pub use generator::{GenerationConfig, generate_synthetic};
pub use split::{SplitConfig, split, split_indices};
