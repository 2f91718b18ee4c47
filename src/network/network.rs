use rand::Rng;
use tracing::debug;

use crate::activation::sigmoid::sigmoid;
use crate::cost::cost_type::CostType;
use crate::data::example::Example;
use crate::errors::{NetworkError, ParameterKind};
use crate::init::weight_init::WeightInit;
use crate::math::matrix::Matrix;

/// Fully-connected sigmoid network.
///
/// `weights[i]` has shape `(sizes[i + 1], sizes[i])` and `biases[i]` has shape
/// `(sizes[i + 1], 1)`. Shapes are fixed at construction and never change;
/// only the optimizer step mutates the values.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    sizes: Vec<usize>,
    pub(crate) weights: Vec<Matrix>,
    pub(crate) biases: Vec<Matrix>,
    cost: CostType,
}

impl Network {
    /// Builds a randomly initialised network for the given layer sizes
    /// (input first, output last).
    pub fn new<R: Rng + ?Sized>(
        sizes: &[usize],
        cost: CostType,
        init: WeightInit,
        rng: &mut R,
    ) -> Result<Network, NetworkError> {
        validate_sizes(sizes)?;

        let mut weights = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::with_capacity(sizes.len() - 1);
        for pair in sizes.windows(2) {
            let (fan_in, size) = (pair[0], pair[1]);
            biases.push(init.biases(size, rng)?);
            weights.push(init.weights(size, fan_in, rng)?);
        }

        debug!(?sizes, ?cost, ?init, "initialised network");
        Ok(Network { sizes: sizes.to_vec(), weights, biases, cost })
    }

    /// Builds a network from explicit parameters, checking every shape
    /// against `sizes`.
    pub fn from_parameters(
        sizes: Vec<usize>,
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
        cost: CostType,
    ) -> Result<Network, NetworkError> {
        validate_sizes(&sizes)?;

        let expected = sizes.len() - 1;
        if weights.len() != expected || biases.len() != expected {
            return Err(NetworkError::LayerCountMismatch {
                sizes: sizes.len(),
                expected,
                weights: weights.len(),
                biases: biases.len(),
            });
        }

        for (layer, pair) in sizes.windows(2).enumerate() {
            check_parameter(ParameterKind::Weights, layer, (pair[1], pair[0]), &weights[layer])?;
            check_parameter(ParameterKind::Biases, layer, (pair[1], 1), &biases[layer])?;
        }

        Ok(Network { sizes, weights, biases, cost })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn num_layers(&self) -> usize {
        self.sizes.len()
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    pub fn cost(&self) -> CostType {
        self.cost
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Output activation for `input`: `a ← σ(W·a + b)` through every layer.
    pub fn feedforward(&self, input: &Matrix) -> Result<Matrix, NetworkError> {
        self.check_input(input)?;
        let mut a = input.clone();
        for (w, b) in self.weights.iter().zip(&self.biases) {
            a = sigmoid(&w.dot(&a)?.add(b)?);
        }
        Ok(a)
    }

    /// Mean cost over `data` plus the L2 penalty ½·(λ/n)·Σ‖W‖².
    pub fn total_cost(&self, data: &[Example], lambda: f64) -> Result<f64, NetworkError> {
        if data.is_empty() {
            return Err(NetworkError::EmptyDataset { name: "cost" });
        }
        let n = data.len() as f64;
        let mut cost = 0.0;
        for example in data {
            self.check_target(&example.target)?;
            let a = self.feedforward(&example.input)?;
            cost += self.cost.loss(&a, &example.target)? / n;
        }
        let penalty: f64 = self.weights.iter().map(Matrix::norm_squared).sum();
        Ok(cost + 0.5 * (lambda / n) * penalty)
    }

    pub(crate) fn check_input(&self, input: &Matrix) -> Result<(), NetworkError> {
        input.validate()?;
        let expected = (self.input_size(), 1);
        if input.shape() != expected {
            return Err(NetworkError::InputShape { expected, got: input.shape() });
        }
        Ok(())
    }

    pub(crate) fn check_target(&self, target: &Matrix) -> Result<(), NetworkError> {
        target.validate()?;
        let expected = (self.output_size(), 1);
        if target.shape() != expected {
            return Err(NetworkError::TargetShape { expected, got: target.shape() });
        }
        Ok(())
    }

    /// Shape and one-hot checks for a dataset handed in by a driver.
    pub(crate) fn check_dataset(&self, data: &[Example], name: &'static str) -> Result<(), NetworkError> {
        if data.is_empty() {
            return Err(NetworkError::EmptyDataset { name });
        }
        for (index, example) in data.iter().enumerate() {
            self.check_input(&example.input)?;
            self.check_target(&example.target)?;
            if !example.is_one_hot() {
                return Err(NetworkError::NotOneHot { index, values: example.target.to_vec() });
            }
        }
        Ok(())
    }
}

fn validate_sizes(sizes: &[usize]) -> Result<(), NetworkError> {
    if sizes.len() < 2 {
        return Err(NetworkError::TooFewLayers(sizes.len()));
    }
    if let Some(index) = sizes.iter().position(|&s| s == 0) {
        return Err(NetworkError::ZeroLayerSize { index });
    }
    Ok(())
}

fn check_parameter(
    kind: ParameterKind,
    layer: usize,
    expected: (usize, usize),
    m: &Matrix,
) -> Result<(), NetworkError> {
    m.validate()?;
    if m.shape() != expected {
        return Err(NetworkError::ParameterShape { kind, layer, expected, got: m.shape() });
    }
    Ok(())
}
