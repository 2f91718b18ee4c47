use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Serialize, Deserialize};

use crate::errors::{MatrixError, Operator};

/// Dense row-major matrix. Column vectors are `(n, 1)` matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Builds an `(n, 1)` column vector.
    pub fn column(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.into_iter().map(|v| vec![v]).collect(),
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyShape { rows, cols });
        }
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatrixError::RaggedRow { row, len: r.len(), expected: cols });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Samples every entry independently from N(0, std_dev).
    pub fn gaussian<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<Matrix, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyShape { rows, cols });
        }
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(MatrixError::InvalidStdDev(std_dev));
        }
        let normal = Normal::new(0.0, std_dev).map_err(|_| MatrixError::InvalidStdDev(std_dev))?;

        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for x in row.iter_mut() {
                *x = normal.sample(rng);
            }
        }

        Ok(res)
    }

    /// Checks that `data` really holds `rows` rows of `cols` entries, which
    /// deserialized matrices do not guarantee.
    pub fn validate(&self) -> Result<(), MatrixError> {
        if self.data.len() != self.rows {
            return Err(MatrixError::RowCount { rows: self.rows, len: self.data.len() });
        }
        if let Some((row, r)) = self.data.iter().enumerate().find(|(_, r)| r.len() != self.cols) {
            return Err(MatrixError::RaggedRow { row, len: r.len(), expected: self.cols });
        }
        Ok(())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, Operator::Add, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, Operator::Sub, |a, b| a - b)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, Operator::Hadamard, |a, b| a * b)
    }

    /// Standard matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != rhs.rows {
            return Err(MatrixError::ShapeMismatch {
                operator: Operator::Dot,
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    pub fn add_assign(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.check_same_shape(rhs, Operator::AddAssign)?;
        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x += y;
            }
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().flatten().sum()
    }

    /// Squared Frobenius norm.
    pub fn norm_squared(&self) -> f64 {
        self.data.iter().flatten().map(|x| x * x).sum()
    }

    /// Row-major index of the largest entry; ties resolve to the first.
    /// `None` for an empty matrix.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &x) in self.data.iter().flatten().enumerate() {
            match best {
                Some((_, b)) if x <= b => {}
                _ => best = Some((i, x)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Entries flattened in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    fn check_same_shape(&self, rhs: &Matrix, operator: Operator) -> Result<(), MatrixError> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::ShapeMismatch {
                operator,
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(())
    }

    fn zip_with<F>(&self, rhs: &Matrix, operator: Operator, op: F) -> Result<Matrix, MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(rhs, operator)?;
        let data = self.data.iter().zip(&rhs.data)
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b).map(|(&a, &b)| op(a, b)).collect()
            })
            .collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn m(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_data(data).unwrap()
    }

    #[test]
    fn dot_multiplies_conformable_matrices() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = Matrix::column(vec![1.0, 0.0, -1.0]);
        assert_eq!(a.dot(&b).unwrap(), Matrix::column(vec![-2.0, -2.0]));
    }

    #[test]
    fn dot_reports_both_shapes_on_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 1);
        assert_eq!(
            a.dot(&b),
            Err(MatrixError::ShapeMismatch { operator: Operator::Dot, left: (2, 3), right: (2, 1) })
        );
    }

    #[test]
    fn elementwise_ops_reject_different_shapes() {
        let a = Matrix::zeros(2, 1);
        let b = Matrix::zeros(1, 2);
        assert!(matches!(a.add(&b), Err(MatrixError::ShapeMismatch { operator: Operator::Add, .. })));
        assert!(matches!(a.sub(&b), Err(MatrixError::ShapeMismatch { operator: Operator::Sub, .. })));
        assert!(matches!(a.hadamard(&b), Err(MatrixError::ShapeMismatch { operator: Operator::Hadamard, .. })));
        let mut c = a.clone();
        assert!(c.add_assign(&b).is_err());
        assert_eq!(c, a);
    }

    #[test]
    fn hadamard_and_transpose() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![2.0, 0.5], vec![-1.0, 0.0]]);
        assert_eq!(a.hadamard(&b).unwrap(), m(vec![vec![2.0, 1.0], vec![-3.0, 0.0]]));
        assert_eq!(a.transpose(), m(vec![vec![1.0, 3.0], vec![2.0, 4.0]]));
        assert_eq!(Matrix::column(vec![1.0, 2.0]).transpose().shape(), (1, 2));
    }

    #[test]
    fn from_data_rejects_empty_and_ragged_rows() {
        assert_eq!(Matrix::from_data(vec![]), Err(MatrixError::EmptyShape { rows: 0, cols: 0 }));
        assert_eq!(
            Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(MatrixError::RaggedRow { row: 1, len: 1, expected: 2 })
        );
    }

    #[test]
    fn validate_catches_inconsistent_fields() {
        let mut a = Matrix::zeros(2, 2);
        assert_eq!(a.validate(), Ok(()));
        a.data[1].pop();
        assert_eq!(a.validate(), Err(MatrixError::RaggedRow { row: 1, len: 1, expected: 2 }));
        a.data.pop();
        assert_eq!(a.validate(), Err(MatrixError::RowCount { rows: 2, len: 1 }));
    }

    #[test]
    fn argmax_picks_first_maximum() {
        assert_eq!(Matrix::column(vec![0.1, 0.7, 0.7, 0.2]).argmax(), Some(1));
        assert_eq!(Matrix::default().argmax(), None);
    }

    #[test]
    fn reductions() {
        let a = m(vec![vec![1.0, -2.0], vec![3.0, 0.5]]);
        assert_eq!(a.sum(), 2.5);
        assert_eq!(a.norm_squared(), 14.25);
        assert_eq!(a.to_vec(), vec![1.0, -2.0, 3.0, 0.5]);
    }

    #[test]
    fn gaussian_is_reproducible_for_a_seed() {
        let a = Matrix::gaussian(3, 4, 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Matrix::gaussian(3, 4, 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), (3, 4));
    }

    #[test]
    fn gaussian_rejects_bad_arguments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(Matrix::gaussian(0, 4, 1.0, &mut rng), Err(MatrixError::EmptyShape { rows: 0, cols: 4 }));
        assert_eq!(Matrix::gaussian(2, 2, 0.0, &mut rng), Err(MatrixError::InvalidStdDev(0.0)));
    }
}
