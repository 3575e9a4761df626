//! Small square systems of linear equations, `A x = b`.

use nalgebra::{dmatrix, dvector, DMatrix, DVector};

use crate::error::{DimensionError, SystemError};

/// A 2x2 or 3x3 linear system.
///
/// Row `i` of the coefficient matrix together with entry `i` of the right-hand side is one
/// equation; column `j` of the coefficient matrix is the vector multiplied by unknown `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl LinearSystem {
    /// Creates a system from its coefficient matrix and right-hand side.
    pub fn new(a: DMatrix<f64>, b: DVector<f64>) -> Result<Self, SystemError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(DimensionError::Matrix {
                expected_rows: n,
                expected_cols: n,
                actual_rows: n,
                actual_cols: a.ncols(),
            }
            .into());
        }
        if !(2..=3).contains(&n) {
            return Err(SystemError::UnsupportedSize(n));
        }
        if b.len() != n {
            return Err(DimensionError::Vector {
                expected: n,
                actual: b.len(),
            }
            .into());
        }

        Ok(Self { a, b })
    }

    /// Creates a system from row-major coefficients and the right-hand side.
    ///
    /// The number of unknowns is the length of `b`.
    pub fn from_rows(coefficients: &[f64], b: &[f64]) -> Result<Self, SystemError> {
        let n = b.len();
        if coefficients.len() != n * n {
            return Err(DimensionError::Vector {
                expected: n * n,
                actual: coefficients.len(),
            }
            .into());
        }
        Self::new(
            DMatrix::from_row_slice(n, n, coefficients),
            DVector::from_column_slice(b),
        )
    }

    /// The 2D demo system: `2x - y = 1`, `x + y = 5`.
    pub fn demo_2d() -> Self {
        Self {
            a: dmatrix![2.0, -1.0; 1.0, 1.0],
            b: dvector![1.0, 5.0],
        }
    }

    /// The 3D demo system: `2u + v + w = 5`, `4u - 6v = -2`, `-2u + 7v + 2w = 9`.
    pub fn demo_3d() -> Self {
        Self {
            a: dmatrix![
                2.0, 1.0, 1.0;
                4.0, -6.0, 0.0;
                -2.0, 7.0, 2.0
            ],
            b: dvector![5.0, -2.0, 9.0],
        }
    }

    /// Returns the number of unknowns (and equations).
    #[inline]
    pub fn size(&self) -> usize {
        self.b.len()
    }

    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.a
    }

    #[inline]
    pub fn rhs(&self) -> &DVector<f64> {
        &self.b
    }

    /// Returns the coefficients and right-hand side of equation `i`.
    pub fn equation(&self, i: usize) -> (Vec<f64>, f64) {
        (self.a.row(i).iter().copied().collect(), self.b[i])
    }

    /// Returns column `j` of the coefficient matrix.
    pub fn column(&self, j: usize) -> DVector<f64> {
        self.a.column(j).into_owned()
    }

    /// Returns the linear combination `sum(coeffs[j] * column(j))`.
    pub fn column_combination(&self, coeffs: &[f64]) -> Result<DVector<f64>, DimensionError> {
        if coeffs.len() != self.size() {
            return Err(DimensionError::Vector {
                expected: self.size(),
                actual: coeffs.len(),
            });
        }
        Ok(&self.a * DVector::from_column_slice(coeffs))
    }

    /// Solves the system with an LU decomposition.
    pub fn solve(&self) -> Result<DVector<f64>, SystemError> {
        let x = self
            .a
            .clone()
            .lu()
            .solve(&self.b)
            .ok_or(SystemError::Singular)?;
        log::debug!("solved {}x{} system: {:?}", self.size(), self.size(), x.as_slice());
        Ok(x)
    }

    /// Solves `A X = B` for every column of `rhs` at once.
    pub fn solve_many(&self, rhs: &DMatrix<f64>) -> Result<DMatrix<f64>, SystemError> {
        if rhs.nrows() != self.size() {
            return Err(DimensionError::Matrix {
                expected_rows: self.size(),
                expected_cols: rhs.ncols(),
                actual_rows: rhs.nrows(),
                actual_cols: rhs.ncols(),
            }
            .into());
        }
        let x = self
            .a
            .clone()
            .lu()
            .solve(rhs)
            .ok_or(SystemError::Singular)?;
        log::trace!(
            "solved {}x{} system for {} right-hand sides",
            self.size(),
            self.size(),
            rhs.ncols()
        );
        Ok(x)
    }
}
