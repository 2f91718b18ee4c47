use crate::errors::{MatrixError, NetworkError};
use crate::math::matrix::Matrix;
use crate::network::{backprop::Gradients, network::Network};

/// Plain gradient descent with optional L2 weight decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    pub lambda: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64, lambda: f64) -> Result<Sgd, NetworkError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(NetworkError::must_be_positive("learning rate", learning_rate));
        }
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(NetworkError::must_be_non_negative("lambda", lambda));
        }
        Ok(Sgd { learning_rate, lambda })
    }

    /// Multiplicative shrink `1 − ηλ/n` applied to every weight before the step.
    pub fn weight_decay(&self, training_size: usize) -> f64 {
        1.0 - self.learning_rate * self.lambda / training_size as f64
    }

    /// Applies summed gradients of a `batch_len`-example batch to `network`.
    ///
    /// New parameters are built in full before any are written back.
    pub fn step(
        &self,
        network: &mut Network,
        nabla: &Gradients,
        batch_len: usize,
        training_size: usize,
    ) -> Result<(), NetworkError> {
        if batch_len == 0 {
            return Err(NetworkError::EmptyBatch);
        }
        if training_size == 0 {
            return Err(NetworkError::must_be_positive("training set size", 0.0));
        }

        nabla.check_layer_count(network.sizes().len(), network.weights.len())?;

        let rate = self.learning_rate / batch_len as f64;
        let decay = self.weight_decay(training_size);

        let biases = network.biases.iter().zip(&nabla.biases)
            .map(|(b, nb)| b.sub(&nb.scale(rate)))
            .collect::<Result<Vec<Matrix>, MatrixError>>()?;
        let weights = network.weights.iter().zip(&nabla.weights)
            .map(|(w, nw)| w.scale(decay).sub(&nw.scale(rate)))
            .collect::<Result<Vec<Matrix>, MatrixError>>()?;

        network.biases = biases;
        network.weights = weights;
        Ok(())
    }
}
