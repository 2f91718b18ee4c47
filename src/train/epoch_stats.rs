use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Number of mini-batch updates applied during the epoch.
    pub batches: usize,
    /// Evaluation accuracy in percent, if an evaluation set was provided.
    pub accuracy: Option<f64>,
    /// Mean evaluation cost, if an evaluation set was provided.
    pub evaluation_cost: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Why `train_loop` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Accuracy failed to improve for more than `improvement_threshold` epochs.
    NoImprovement,
    /// `max_epochs` was reached.
    EpochLimit,
    /// The stop flag was raised.
    Cancelled,
    /// The progress receiver went away.
    ReceiverDropped,
}

/// Summary returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub epochs_run: usize,
    pub best_accuracy: Option<f64>,
    pub stop_reason: StopReason,
    pub history: Vec<EpochStats>,
}
