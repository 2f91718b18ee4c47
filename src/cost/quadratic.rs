use crate::activation::sigmoid::sigmoid_prime;
use crate::errors::MatrixError;
use crate::math::matrix::Matrix;

pub struct QuadraticCost;

impl QuadraticCost {
    /// C = ½‖a − y‖²
    pub fn loss(a: &Matrix, y: &Matrix) -> Result<f64, MatrixError> {
        Ok(0.5 * a.sub(y)?.norm_squared())
    }

    /// δ = (a − y) ⊙ σ'(z)
    pub fn delta(a: &Matrix, y: &Matrix, z: &Matrix) -> Result<Matrix, MatrixError> {
        a.sub(y)?.hadamard(&sigmoid_prime(z))
    }
}
