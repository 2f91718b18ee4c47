use std::borrow::Borrow;

use rayon::prelude::*;
use tracing::trace;

use crate::activation::sigmoid::{sigmoid, sigmoid_prime};
use crate::data::example::Example;
use crate::errors::NetworkError;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;

/// Per-layer cost gradients, indexed like `Network::weights` / `Network::biases`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub biases: Vec<Matrix>,
    pub weights: Vec<Matrix>,
}

impl Gradients {
    /// Zero gradients with the parameter shapes of `network`.
    pub fn zeros_like(network: &Network) -> Gradients {
        Gradients {
            biases: network.biases().iter().map(|b| Matrix::zeros(b.rows, b.cols)).collect(),
            weights: network.weights().iter().map(|w| Matrix::zeros(w.rows, w.cols)).collect(),
        }
    }

    /// Errors unless there are exactly `expected` weight and bias entries.
    pub(crate) fn check_layer_count(&self, sizes: usize, expected: usize) -> Result<(), NetworkError> {
        if self.weights.len() != expected || self.biases.len() != expected {
            return Err(NetworkError::LayerCountMismatch {
                sizes,
                expected,
                weights: self.weights.len(),
                biases: self.biases.len(),
            });
        }
        Ok(())
    }

    pub fn accumulate(&mut self, other: &Gradients) -> Result<(), NetworkError> {
        let layers = self.weights.len();
        self.check_layer_count(layers + 1, layers)?;
        other.check_layer_count(layers + 1, layers)?;
        for (acc, g) in self.biases.iter_mut().zip(&other.biases) {
            acc.add_assign(g)?;
        }
        for (acc, g) in self.weights.iter_mut().zip(&other.weights) {
            acc.add_assign(g)?;
        }
        Ok(())
    }
}

impl Network {
    /// Gradient of the cost for a single example `(x, y)`.
    ///
    /// The forward pass keeps every weighted input `z` and activation `a`;
    /// the backward pass starts from the cost's output error and walks the
    /// layers in reverse, gating each propagated error with σ'(z).
    pub fn backpropagate(&self, x: &Matrix, y: &Matrix) -> Result<Gradients, NetworkError> {
        self.check_input(x)?;
        self.check_target(y)?;

        let layers = self.weights.len();
        let mut activations = Vec::with_capacity(layers + 1);
        let mut weighted_inputs = Vec::with_capacity(layers);
        activations.push(x.clone());

        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = w.dot(&activations[activations.len() - 1])?.add(b)?;
            activations.push(sigmoid(&z));
            weighted_inputs.push(z);
        }

        let mut delta = self.cost().output_error(&activations[layers], y, &weighted_inputs[layers - 1])?;

        let mut nabla_b = Vec::with_capacity(layers);
        let mut nabla_w = Vec::with_capacity(layers);
        for l in (0..layers).rev() {
            nabla_w.push(delta.dot(&activations[l].transpose())?);
            if l == 0 {
                nabla_b.push(delta);
                break;
            }
            let propagated = self.weights[l]
                .transpose()
                .dot(&delta)?
                .hadamard(&sigmoid_prime(&weighted_inputs[l - 1]))?;
            nabla_b.push(std::mem::replace(&mut delta, propagated));
        }
        nabla_b.reverse();
        nabla_w.reverse();

        Ok(Gradients { biases: nabla_b, weights: nabla_w })
    }

    /// One gradient-descent step over `batch`.
    ///
    /// Per-example gradients are computed in parallel, summed in batch order,
    /// then applied as
    /// `b ← b − (η/m)·Σ∇b` and `w ← w·(1 − ηλ/n) − (η/m)·Σ∇w`
    /// where `m` is the batch length and `n` the training-set size.
    /// If any example fails, the parameters are left untouched.
    pub fn update_mini_batch<B>(
        &mut self,
        batch: &[B],
        eta: f64,
        lambda: f64,
        training_size: usize,
    ) -> Result<(), NetworkError>
    where
        B: Borrow<Example> + Sync,
    {
        if batch.is_empty() {
            return Err(NetworkError::EmptyBatch);
        }
        let sgd = Sgd::new(eta, lambda)?;

        let per_example: Vec<Gradients> = batch
            .par_iter()
            .map(|example| {
                let example: &Example = example.borrow();
                self.backpropagate(&example.input, &example.target)
            })
            .collect::<Result<Vec<Gradients>, NetworkError>>()?;

        let mut nabla = Gradients::zeros_like(self);
        for g in &per_example {
            nabla.accumulate(g)?;
        }

        sgd.step(self, &nabla, batch.len(), training_size)?;
        trace!(batch = batch.len(), "applied mini-batch");
        Ok(())
    }
}
