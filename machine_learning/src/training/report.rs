/// A progress observation emitted every `log_every` epochs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub epoch: usize,
    pub loss: f64,
}

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason {
    /// Every configured epoch ran.
    EpochCap,

    /// The loss improvement fell under the early stop delta. The epoch's update was not applied.
    EarlyStop {
        /// The epoch at which training halted.
        epoch: usize,
        /// The observed improvement, `previous_loss - loss`.
        delta: f64,
    },
}

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    stop: StopReason,
    losses: Vec<f64>,
}

impl TrainReport {
    pub(crate) fn new(stop: StopReason, losses: Vec<f64>) -> Self {
        Self { stop, losses }
    }

    pub fn stop(&self) -> StopReason {
        self.stop
    }

    /// The loss of every evaluated epoch, including the one that triggered an early stop.
    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    /// The loss of the last evaluated epoch.
    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }

    /// Returns the amount of parameter updates applied to the model.
    pub fn updates(&self) -> usize {
        match self.stop {
            StopReason::EpochCap => self.losses.len(),
            StopReason::EarlyStop { epoch, .. } => epoch,
        }
    }

    pub fn stopped_early(&self) -> bool {
        matches!(self.stop, StopReason::EarlyStop { .. })
    }
}
