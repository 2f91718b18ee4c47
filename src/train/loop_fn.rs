use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::data::example::Example;
use crate::errors::NetworkError;
use crate::network::network::Network;
use crate::train::early_stopping::EarlyStopping;
use crate::train::epoch_stats::{EpochStats, StopReason, TrainReport};
use crate::train::evaluate::evaluate;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` with mini-batch SGD until a stopping condition fires.
///
/// # Arguments
/// - `network`: mutable reference to the network; modified in place
/// - `training`: training examples with one-hot targets
/// - `evaluation`: optional held-out examples; scored after every epoch and
///   used for early stopping
/// - `config`: hyperparameters, optional progress channel, optional stop flag
/// - `rng`: source of the per-epoch shuffles
///
/// # Termination
/// The loop stops when the evaluation accuracy has not strictly improved for
/// more than `config.improvement_threshold` epochs, when `config.max_epochs`
/// is reached, when `config.stop_flag` is raised, or when the `progress_tx`
/// receiver has been dropped.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    training: &[Example],
    evaluation: Option<&[Example]>,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainReport, NetworkError> {
    config.validate(evaluation.is_some())?;
    network.check_dataset(training, "training")?;
    if let Some(data) = evaluation {
        network.check_dataset(data, "evaluation")?;
    }

    debug!(
        training = training.len(),
        evaluation = evaluation.map_or(0, |d| d.len()),
        eta = config.learning_rate,
        lambda = config.lambda,
        mini_batch_size = config.mini_batch_size,
        "starting training"
    );

    let mut stopping = EarlyStopping::new(config.improvement_threshold);
    let mut history = Vec::new();

    let stop_reason = loop {
        if stop_requested(config) {
            break StopReason::Cancelled;
        }
        if config.max_epochs.is_some_and(|max| history.len() >= max) {
            break StopReason::EpochLimit;
        }

        let epoch = history.len() + 1;
        let t_start = Instant::now();

        let batches = run_epoch(network, training, config, rng)?;

        let scored = evaluation.map(|data| evaluate(network, data)).transpose()?;
        let stats = EpochStats {
            epoch,
            batches,
            accuracy: scored.as_ref().map(|e| e.accuracy()),
            evaluation_cost: scored.as_ref().map(|e| e.mean_cost),
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            epoch,
            batches,
            accuracy = ?stats.accuracy,
            cost = ?stats.evaluation_cost,
            elapsed_ms = stats.elapsed_ms,
            "epoch complete"
        );

        let stalled = stats.accuracy.is_some_and(|accuracy| stopping.observe(accuracy));
        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                break StopReason::ReceiverDropped;
            }
        }
        if stalled {
            break StopReason::NoImprovement;
        }
    };

    info!(epochs = history.len(), ?stop_reason, best_accuracy = ?stopping.best(), "training stopped");

    Ok(TrainReport {
        epochs_run: history.len(),
        best_accuracy: stopping.best(),
        stop_reason,
        history,
    })
}

/// Runs a single epoch: shuffle, split into mini-batches, one update per
/// batch in order. Returns the number of batches applied.
pub fn train_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    training: &[Example],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<usize, NetworkError> {
    config.validate_hyperparameters()?;
    network.check_dataset(training, "training")?;
    run_epoch(network, training, config, rng)
}

impl Network {
    /// See [`train_loop`].
    pub fn train<R: Rng + ?Sized>(
        &mut self,
        training: &[Example],
        evaluation: Option<&[Example]>,
        config: &TrainConfig,
        rng: &mut R,
    ) -> Result<TrainReport, NetworkError> {
        train_loop(self, training, evaluation, config, rng)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn run_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    training: &[Example],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<usize, NetworkError> {
    // Fresh permutation every epoch.
    let mut order: Vec<&Example> = training.iter().collect();
    order.shuffle(rng);

    let mut batches = 0;
    for batch in order.chunks(config.mini_batch_size) {
        network.update_mini_batch(batch, config.learning_rate, config.lambda, training.len())?;
        batches += 1;
    }
    Ok(batches)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}
