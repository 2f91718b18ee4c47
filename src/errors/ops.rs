use std::fmt::{self, Display};

/// Binary matrix operations that can fail on non-conformable shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    AddAssign,
    Sub,
    Hadamard,
    Dot,
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Add => "add",
            Operator::AddAssign => "add in place",
            Operator::Sub => "subtract",
            Operator::Hadamard => "multiply element-wise",
            Operator::Dot => "multiply",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    GreaterThan,
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::GreaterThan => ">",
        };
        write!(f, "{}", symbol)
    }
}

/// Which per-layer parameter a shape error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Weights,
    Biases,
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::Weights => write!(f, "weight matrix"),
            ParameterKind::Biases => write!(f, "bias vector"),
        }
    }
}
