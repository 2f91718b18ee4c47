use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::errors::MatrixError;
use crate::math::matrix::Matrix;

/// Selects how a new network draws its starting parameters.
///
/// - `Naive`: every weight and bias from N(0, 1).
/// - `Scaled`: biases from N(0, 1), weights into a layer with `fan_in`
///   inputs from N(0, 1/√fan_in). Keeps the weighted input of wide layers
///   out of the sigmoid's flat tails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightInit {
    Naive,
    #[default]
    Scaled,
}

impl WeightInit {
    pub fn weight_std_dev(&self, fan_in: usize) -> f64 {
        match self {
            WeightInit::Naive => 1.0,
            WeightInit::Scaled => 1.0 / (fan_in as f64).sqrt(),
        }
    }

    /// Weight matrix of shape `(size, fan_in)`.
    pub fn weights<R: Rng + ?Sized>(
        &self,
        size: usize,
        fan_in: usize,
        rng: &mut R,
    ) -> Result<Matrix, MatrixError> {
        Matrix::gaussian(size, fan_in, self.weight_std_dev(fan_in), rng)
    }

    /// Bias column of shape `(size, 1)`; N(0, 1) under both policies.
    pub fn biases<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Matrix, MatrixError> {
        Matrix::gaussian(size, 1, 1.0, rng)
    }
}
