use crate::math::matrix::Matrix;

/// Outputs are kept inside `[EDGE, 1 - EDGE]` so `ln(a)` and `ln(1 - a)`
/// stay finite in the cross-entropy cost even for saturated units.
pub const EDGE: f64 = 1e-12;

/// Logistic function σ(z) = 1 / (1 + e^{-z}).
pub fn logistic(z: f64) -> f64 {
    (1.0 / (1.0 + (-z).exp())).clamp(EDGE, 1.0 - EDGE)
}

/// σ'(z) = σ(z)·(1 − σ(z)), built on the same `logistic` as the forward pass.
pub fn logistic_prime(z: f64) -> f64 {
    let s = logistic(z);
    s * (1.0 - s)
}

/// Element-wise sigmoid of a weighted-input vector.
pub fn sigmoid(z: &Matrix) -> Matrix {
    z.map(logistic)
}

/// Element-wise sigmoid derivative of a weighted-input vector.
pub fn sigmoid_prime(z: &Matrix) -> Matrix {
    z.map(logistic_prime)
}
