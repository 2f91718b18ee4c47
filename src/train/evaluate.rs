use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::data::example::Example;
use crate::errors::NetworkError;
use crate::network::network::Network;

/// Predicted and true class index for one evaluation example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted: usize,
    pub actual: usize,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }
}

/// Outcome of running a network over a labelled dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    /// Mean unregularized cost over the dataset.
    pub mean_cost: f64,
    /// One entry per example, in dataset order.
    pub predictions: Vec<Prediction>,
}

impl Evaluation {
    /// Accuracy in percent: correct / total × 100.
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / self.total as f64 * 100.0
    }
}

/// Classifies every example of `data` by argmax of the network output and
/// compares it with the argmax of the one-hot target.
pub fn evaluate(network: &Network, data: &[Example]) -> Result<Evaluation, NetworkError> {
    network.check_dataset(data, "evaluation")?;

    let scored: Vec<(Prediction, f64)> = data
        .par_iter()
        .map(|example| -> Result<(Prediction, f64), NetworkError> {
            let output = network.feedforward(&example.input)?;
            let cost = network.cost().loss(&output, &example.target)?;
            let prediction = Prediction {
                predicted: output.argmax().unwrap_or(0),
                actual: example.label().unwrap_or(0),
            };
            Ok((prediction, cost))
        })
        .collect::<Result<Vec<(Prediction, f64)>, NetworkError>>()?;

    let total = scored.len();
    let correct = scored.iter().filter(|(p, _)| p.is_correct()).count();
    let mean_cost = scored.iter().map(|(_, c)| c).sum::<f64>() / total as f64;
    let predictions = scored.into_iter().map(|(p, _)| p).collect();

    Ok(Evaluation { correct, total, mean_cost, predictions })
}
