use thiserror::Error;
mod ops;
pub use self::ops::*;

/// Failures raised by the dense `Matrix` substrate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("cannot {operator} matrices of shape {left:?} and {right:?}")]
    ShapeMismatch {
        operator: Operator,
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("matrix needs at least one row and one column, got {rows}x{cols}")]
    EmptyShape { rows: usize, cols: usize },
    #[error("matrix declares {rows} rows but holds {len}")]
    RowCount { rows: usize, len: usize },
    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("standard deviation must be finite and positive, got {0}")]
    InvalidStdDev(f64),
}

/// Failures raised by network construction, training and persistence.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("a network needs at least 2 layers, got {0}")]
    TooFewLayers(usize),
    #[error("layer {index} has size 0; every layer size must be positive")]
    ZeroLayerSize { index: usize },
    #[error("{name} must be {operator} {threshold}, got {value}")]
    ValueMustSatisfyComparison {
        name: &'static str,
        operator: ComparisonOperator,
        threshold: f64,
        value: f64,
    },
    #[error("input has shape {got:?}, expected {expected:?}")]
    InputShape {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("target has shape {got:?}, expected {expected:?}")]
    TargetShape {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("target of example {index} is not a one-hot vector: {values:?}")]
    NotOneHot { index: usize, values: Vec<f64> },
    #[error("label {label} is out of range for {classes} classes")]
    LabelOutOfRange { label: usize, classes: usize },
    #[error("mini-batch is empty")]
    EmptyBatch,
    #[error("{name} set is empty")]
    EmptyDataset { name: &'static str },
    #[error("{kind} of layer {layer} has shape {got:?}, expected {expected:?}")]
    ParameterShape {
        kind: ParameterKind,
        layer: usize,
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("{sizes} layer sizes need {expected} weight and bias entries, got {weights} weights and {biases} biases")]
    LayerCountMismatch {
        sizes: usize,
        expected: usize,
        weights: usize,
        biases: usize,
    },
    #[error("training has no stopping condition: supply an evaluation set or max_epochs")]
    NoStoppingCondition,
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn must_be_positive(name: &'static str, value: f64) -> NetworkError {
        NetworkError::ValueMustSatisfyComparison {
            name,
            operator: ComparisonOperator::GreaterThan,
            threshold: 0.0,
            value,
        }
    }

    pub(crate) fn must_be_non_negative(name: &'static str, value: f64) -> NetworkError {
        NetworkError::ValueMustSatisfyComparison {
            name,
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 0.0,
            value,
        }
    }
}
