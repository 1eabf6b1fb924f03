mod config;
mod report;
mod trainer;

pub use config::TrainingConfig;
pub use report::{Progress, StopReason, TrainReport};
pub use trainer::Trainer;
