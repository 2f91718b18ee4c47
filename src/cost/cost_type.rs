use serde::{Serialize, Deserialize};

use crate::cost::{cross_entropy::CrossEntropyCost, quadratic::QuadraticCost};
use crate::errors::MatrixError;
use crate::math::matrix::Matrix;

/// Selects the cost a network is trained against. Fixed at construction.
///
/// - `Quadratic`: ½‖a − y‖²; its output error carries σ'(z) and learns
///   slowly once output units saturate.
/// - `CrossEntropy`: the default; its output error is simply `a − y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Quadratic,
    #[default]
    CrossEntropy,
}

impl CostType {
    /// Scalar cost of output activation `a` against target `y`.
    pub fn loss(&self, a: &Matrix, y: &Matrix) -> Result<f64, MatrixError> {
        match self {
            CostType::Quadratic    => QuadraticCost::loss(a, y),
            CostType::CrossEntropy => CrossEntropyCost::loss(a, y),
        }
    }

    /// Error signal δ injected at the output layer during backpropagation.
    pub fn output_error(&self, a: &Matrix, y: &Matrix, z: &Matrix) -> Result<Matrix, MatrixError> {
        match self {
            CostType::Quadratic    => QuadraticCost::delta(a, y, z),
            CostType::CrossEntropy => CrossEntropyCost::delta(a, y, z),
        }
    }
}
