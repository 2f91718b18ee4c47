use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::errors::NetworkError;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `learning_rate`: step size η; must be positive
/// - `mini_batch_size`: examples per gradient step; the last batch of
///   an epoch may be shorter
/// - `lambda`: L2 weight-decay strength λ; `0.0` disables it
/// - `improvement_threshold`: non-improving epochs tolerated before early
///   stopping (needs an evaluation set)
/// - `max_epochs`: optional hard cap on the number of epochs
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent
///   per completed epoch.  If the receiver is dropped
///   the loop terminates early.
/// - `stop_flag`: optional atomic flag; when set to `true` from
///   another thread the loop stops after the current
///   epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub mini_batch_size: usize,
    #[serde(default)]
    pub lambda: f64,
    #[serde(default = "default_improvement_threshold")]
    pub improvement_threshold: usize,
    #[serde(default)]
    pub max_epochs: Option<usize>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

pub const DEFAULT_IMPROVEMENT_THRESHOLD: usize = 10;

fn default_improvement_threshold() -> usize {
    DEFAULT_IMPROVEMENT_THRESHOLD
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no regularization, the default
    /// improvement threshold, no epoch cap, no progress channel and no stop flag.
    pub fn new(learning_rate: f64, mini_batch_size: usize) -> Self {
        TrainConfig {
            learning_rate,
            mini_batch_size,
            lambda: 0.0,
            improvement_threshold: DEFAULT_IMPROVEMENT_THRESHOLD,
            max_epochs: None,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_improvement_threshold(mut self, threshold: usize) -> Self {
        self.improvement_threshold = threshold;
        self
    }

    pub fn with_max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = Some(epochs);
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// Checks the per-epoch hyperparameters.
    pub fn validate_hyperparameters(&self) -> Result<(), NetworkError> {
        Sgd::new(self.learning_rate, self.lambda)?;
        if self.mini_batch_size == 0 {
            return Err(NetworkError::must_be_positive("mini-batch size", 0.0));
        }
        Ok(())
    }

    /// Checks a whole run. `has_evaluation` tells whether an evaluation set
    /// will drive early stopping.
    pub fn validate(&self, has_evaluation: bool) -> Result<(), NetworkError> {
        self.validate_hyperparameters()?;
        match self.max_epochs {
            Some(0) => Err(NetworkError::must_be_positive("max epochs", 0.0)),
            None if !has_evaluation => Err(NetworkError::NoStoppingCondition),
            _ => Ok(()),
        }
    }

    /// Deserializes the hyperparameters from a JSON file.
    pub fn load_json(path: &str) -> Result<TrainConfig, NetworkError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
