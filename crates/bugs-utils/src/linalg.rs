//! Minimal dense linear algebra for small, row-major matrices: enough
//! to evaluate a multivariate-Normal log-density, Cholesky-sample from
//! a precision matrix, and solve the block linear systems the
//! conjugate/GLM samplers need. Not a general-purpose linear-algebra
//! library — sizes here are block/variable counts, not image data.

/// A square, row-major matrix of dimension `n x n`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn from_row_major(n: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), n * n, "matrix data length must be n*n");
        Self { n, data }
    }

    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        self.data[i * self.n + j] = v;
    }

    /// Lower-triangular Cholesky factor `L` such that `L * L^T == self`.
    /// Returns `None` if the matrix is not positive-definite.
    pub fn cholesky(&self) -> Option<Matrix> {
        let n = self.n;
        let mut l = Matrix::zeros(n);
        for i in 0..n {
            for j in 0..=i {
                let mut sum = self.get(i, j);
                for k in 0..j {
                    sum -= l.get(i, k) * l.get(j, k);
                }
                if i == j {
                    if sum <= 0.0 {
                        return None;
                    }
                    l.set(i, j, sum.sqrt());
                } else {
                    l.set(i, j, sum / l.get(j, j));
                }
            }
        }
        Some(l)
    }

    /// log(det(self)) via the Cholesky factor: `ln det(A) = 2 * sum(ln diag(L))`.
    pub fn log_det(&self) -> Option<f64> {
        let l = self.cholesky()?;
        Some(2.0 * (0..self.n).map(|i| l.get(i, i).ln()).sum::<f64>())
    }

    /// Solves `L * x = b` for lower-triangular `L` (forward substitution).
    pub fn forward_solve(&self, b: &[f64]) -> Vec<f64> {
        let n = self.n;
        let mut x = vec![0.0; n];
        for i in 0..n {
            let mut sum = b[i];
            for k in 0..i {
                sum -= self.get(i, k) * x[k];
            }
            x[i] = sum / self.get(i, i);
        }
        x
    }

    /// Solves `L^T * x = b` for lower-triangular `L` (back substitution).
    pub fn back_solve_transpose(&self, b: &[f64]) -> Vec<f64> {
        let n = self.n;
        let mut x = vec![0.0; n];
        for ii in 0..n {
            let i = n - 1 - ii;
            let mut sum = b[i];
            for k in (i + 1)..n {
                sum -= self.get(k, i) * x[k];
            }
            x[i] = sum / self.get(i, i);
        }
        x
    }

    /// Solves `self * x = b` using the Cholesky factorization.
    pub fn solve_spd(&self, b: &[f64]) -> Option<Vec<f64>> {
        let l = self.cholesky()?;
        let y = l.forward_solve(b);
        Some(l.back_solve_transpose(&y))
    }

    /// The quadratic form `v^T * self * v`.
    pub fn quad_form(&self, v: &[f64]) -> f64 {
        let mut acc = 0.0;
        for i in 0..self.n {
            let mut row = 0.0;
            for j in 0..self.n {
                row += self.get(i, j) * v[j];
            }
            acc += v[i] * row;
        }
        acc
    }

    pub fn mat_vec(&self, v: &[f64]) -> Vec<f64> {
        (0..self.n)
            .map(|i| (0..self.n).map(|j| self.get(i, j) * v[j]).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cholesky_reconstructs_identity() {
        let m = Matrix::identity(3);
        let l = m.cholesky().unwrap();
        assert_eq!(l, Matrix::identity(3));
    }

    #[test]
    fn solve_spd_matches_known_system() {
        // [[4, 0], [0, 9]] x = [8, 27] => x = [2, 3]
        let m = Matrix::from_row_major(2, vec![4.0, 0.0, 0.0, 9.0]);
        let x = m.solve_spd(&[8.0, 27.0]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-9);
        assert!((x[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn log_det_of_diagonal_matrix() {
        let m = Matrix::from_row_major(2, vec![2.0, 0.0, 0.0, 8.0]);
        let ld = m.log_det().unwrap();
        assert!((ld - (2.0_f64.ln() + 8.0_f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn non_positive_definite_returns_none() {
        let m = Matrix::from_row_major(2, vec![1.0, 2.0, 2.0, 1.0]);
        assert!(m.cholesky().is_none());
    }
}
