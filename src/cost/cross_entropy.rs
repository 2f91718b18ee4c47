use crate::activation::sigmoid::EDGE;
use crate::errors::MatrixError;
use crate::math::matrix::Matrix;

/// Cross-entropy cost for sigmoid output units.
pub struct CrossEntropyCost;

impl CrossEntropyCost {
    /// C = −Σ [y·ln(a) + (1 − y)·ln(1 − a)]
    ///
    /// `a` is clamped into `[EDGE, 1 − EDGE]` before taking logs.
    pub fn loss(a: &Matrix, y: &Matrix) -> Result<f64, MatrixError> {
        let a = a.map(|p| p.clamp(EDGE, 1.0 - EDGE));
        let log_a = a.map(f64::ln);
        let log_not_a = a.map(|p| (1.0 - p).ln());
        let not_y = y.map(|t| 1.0 - t);
        let total = y.hadamard(&log_a)?.add(&not_y.hadamard(&log_not_a)?)?;
        Ok(-total.sum())
    }

    /// δ = a − y
    ///
    /// The σ'(z) factor of the chain rule cancels against the derivative of
    /// the cost, so `z` is not consulted.
    pub fn delta(a: &Matrix, y: &Matrix, _z: &Matrix) -> Result<Matrix, MatrixError> {
        a.sub(y)
    }
}
