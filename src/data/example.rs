use serde::{Serialize, Deserialize};

use crate::errors::NetworkError;
use crate::math::matrix::Matrix;

/// One training or evaluation pair: an input column and its target column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Matrix,
    pub target: Matrix,
}

impl Example {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Example {
        Example {
            input: Matrix::column(input),
            target: Matrix::column(target),
        }
    }

    /// Pairs `input` with a one-hot target of length `classes` marking `label`.
    pub fn labelled(input: Vec<f64>, label: usize, classes: usize) -> Result<Example, NetworkError> {
        if label >= classes {
            return Err(NetworkError::LabelOutOfRange { label, classes });
        }
        let mut target = vec![0.0; classes];
        target[label] = 1.0;
        Ok(Example::new(input, target))
    }

    /// Class index of the target (argmax).
    pub fn label(&self) -> Option<usize> {
        self.target.argmax()
    }

    /// Exactly one entry equal to 1, every other entry 0.
    pub fn is_one_hot(&self) -> bool {
        let values = self.target.to_vec();
        values.iter().all(|&v| v == 0.0 || v == 1.0)
            && values.iter().filter(|&&v| v == 1.0).count() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_builds_one_hot_target() {
        let ex = Example::labelled(vec![0.2, 0.4], 2, 4).unwrap();
        assert_eq!(ex.target.to_vec(), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(ex.input.shape(), (2, 1));
        assert_eq!(ex.label(), Some(2));
        assert!(ex.is_one_hot());
    }

    #[test]
    fn labelled_rejects_out_of_range_label() {
        assert!(matches!(
            Example::labelled(vec![0.0], 3, 3),
            Err(NetworkError::LabelOutOfRange { label: 3, classes: 3 })
        ));
    }

    #[test]
    fn detects_malformed_targets() {
        assert!(!Example::new(vec![0.0], vec![1.0, 1.0]).is_one_hot());
        assert!(!Example::new(vec![0.0], vec![0.0, 0.0]).is_one_hot());
        assert!(!Example::new(vec![0.0], vec![0.5, 0.5]).is_one_hot());
        assert!(Example::new(vec![0.0], vec![1.0]).is_one_hot());
    }
}
