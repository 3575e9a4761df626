//! Stepwise interpolation of a 2D linear transform.
//!
//! A linear transform `A` is animated by interpolating its matrix from the identity to `A` and
//! applying every intermediate matrix to the same set of points:
//!
//! ```text
//! M_j = I + (j / nsteps) * (A - I),   j = 0..=nsteps
//! ```
//!
//! The first entry of the resulting sequence is the untransformed point set, the last one is the
//! point set with `A` applied in full.

use nalgebra::{DMatrix, Matrix2, Matrix2xX, Vector2};

use crate::error::{DimensionError, Result};

/// A set of 2D points, stored as the columns of a `2 x n` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    coords: Matrix2xX<f64>,
}

impl PointSet {
    /// Creates a point set from two parallel coordinate arrays.
    pub fn from_coords(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(DimensionError::CoordinateLengths {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        Ok(Self {
            coords: Matrix2xX::from_fn(xs.len(), |row, col| match row {
                0 => xs[col],
                _ => ys[col],
            }),
        })
    }

    /// Creates a point set from a matrix whose columns are the points.
    ///
    /// The matrix must have exactly 2 rows.
    pub fn from_matrix(m: &DMatrix<f64>) -> Result<Self> {
        if m.nrows() != 2 {
            return Err(DimensionError::Points { actual: m.nrows() });
        }

        Ok(Self {
            coords: Matrix2xX::from_fn(m.ncols(), |row, col| m[(row, col)]),
        })
    }

    /// Collects `[x, y]` pairs into a point set.
    pub fn from_points<I: IntoIterator<Item = [f64; 2]>>(points: I) -> Self {
        let flat = points.into_iter().flatten().collect::<Vec<_>>();
        Self {
            coords: Matrix2xX::from_column_slice(&flat),
        }
    }

    /// Builds the grid of all `(x, y)` combinations.
    ///
    /// Points are ordered x-major: for every x-value, all y-values are visited in order.
    pub fn grid(xvals: &[f64], yvals: &[f64]) -> Self {
        Self::from_points(
            xvals
                .iter()
                .flat_map(|&x| yvals.iter().map(move |&y| [x, y])),
        )
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying `2 x n` matrix.
    #[inline]
    pub fn as_matrix(&self) -> &Matrix2xX<f64> {
        &self.coords
    }

    /// Returns the point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn point(&self, index: usize) -> Vector2<f64> {
        self.coords.column(index).into_owned()
    }

    /// Returns an iterator over all points, in order.
    pub fn points(&self) -> impl Iterator<Item = Vector2<f64>> + '_ {
        self.coords.column_iter().map(|col| col.into_owned())
    }

    /// Returns an iterator over the x-coordinates.
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.coords.column_iter().map(|col| col[0])
    }

    /// Returns an iterator over the y-coordinates.
    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.coords.column_iter().map(|col| col[1])
    }

    /// Returns the largest absolute value of any coordinate, or 0 for an empty set.
    pub fn max_abs(&self) -> f64 {
        self.coords.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }

    /// Applies a linear transform to every point.
    pub fn transformed(&self, m: &Matrix2<f64>) -> PointSet {
        PointSet {
            coords: m * &self.coords,
        }
    }
}

/// Converts a dynamically sized matrix to a 2x2 transform matrix.
pub fn to_matrix2(a: &DMatrix<f64>) -> Result<Matrix2<f64>> {
    if a.shape() != (2, 2) {
        return Err(DimensionError::Matrix {
            expected_rows: 2,
            expected_cols: 2,
            actual_rows: a.nrows(),
            actual_cols: a.ncols(),
        });
    }

    Ok(a.fixed_view::<2, 2>(0, 0).into_owned())
}

/// Returns the matrix `I + t * (A - I)`.
///
/// `t = 0` yields the identity, `t = 1` yields `a`.
pub fn interpolate(a: &Matrix2<f64>, t: f64) -> Matrix2<f64> {
    let id = Matrix2::identity();
    id + (a - id) * t
}

/// Returns `a · points`.
pub fn apply(a: &DMatrix<f64>, points: &PointSet) -> Result<PointSet> {
    Ok(points.transformed(&to_matrix2(a)?))
}

/// Generates the `nsteps + 1` intermediate point sets between `points` and `a · points`.
///
/// Entry `j` is `points` transformed by [`interpolate`]`(a, j / nsteps)`. For `nsteps = 0` the
/// single entry is `a` applied in full.
///
/// Fails with [`DimensionError`] when `a` is not 2x2.
pub fn generate(a: &DMatrix<f64>, points: &PointSet, nsteps: usize) -> Result<Vec<PointSet>> {
    let a = to_matrix2(a)?;
    Ok(stepwise(&a, points, nsteps))
}

/// Like [`generate`], but with a statically 2x2 matrix, so it cannot fail.
pub fn stepwise(a: &Matrix2<f64>, points: &PointSet, nsteps: usize) -> Vec<PointSet> {
    log::trace!("interpolating {} points in {} steps", points.len(), nsteps);
    (0..=nsteps)
        .map(|j| {
            let t = if nsteps == 0 {
                1.0
            } else {
                j as f64 / nsteps as f64
            };
            points.transformed(&interpolate(a, t))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dmatrix;

    use super::*;

    const EPS: f64 = 1e-9;

    /// The example transform, with columns `[2, 1]` and `[-1, 1]`.
    fn example() -> DMatrix<f64> {
        dmatrix![2.0, -1.0; 1.0, 1.0]
    }

    fn demo_points() -> PointSet {
        PointSet::from_coords(&[1.0, -4.0, 0.5, 3.0], &[0.0, 2.0, -3.0, 3.0]).unwrap()
    }

    #[test]
    fn single_point_example() {
        let points = PointSet::from_points([[1.0, 0.0]]);
        let seq = generate(&example(), &points, 2).unwrap();
        assert_eq!(seq.len(), 3);

        let expected = [[1.0, 0.0], [1.5, 0.5], [2.0, 1.0]];
        for (set, [x, y]) in seq.iter().zip(expected) {
            assert_relative_eq!(set.point(0), Vector2::new(x, y), epsilon = EPS);
        }
    }

    #[test]
    fn endpoints() {
        let points = demo_points();
        for nsteps in [1, 2, 7, 30] {
            let seq = generate(&example(), &points, nsteps).unwrap();
            assert_eq!(seq.len(), nsteps + 1);
            assert_eq!(seq[0], points);
            assert_relative_eq!(
                seq[nsteps].as_matrix(),
                &(to_matrix2(&example()).unwrap() * points.as_matrix()),
                epsilon = EPS
            );
        }
    }

    #[test]
    fn identity_leaves_points_alone() {
        let points = demo_points();
        for nsteps in [0, 1, 5] {
            let seq = generate(&DMatrix::identity(2, 2), &points, nsteps).unwrap();
            assert_eq!(seq.len(), nsteps + 1);
            for set in &seq {
                assert_relative_eq!(set.as_matrix(), points.as_matrix(), epsilon = EPS);
            }
        }
    }

    #[test]
    fn midpoint_is_average_of_identity_and_target() {
        let mut rng = fastrand::Rng::with_seed(0x5eed_1234);
        let points = demo_points();
        for _ in 0..20 {
            let a = Matrix2::from_fn(|_, _| rng.f64() * 8.0 - 4.0);
            let seq = stepwise(&a, &points, 2);
            let half = (Matrix2::identity() + a) / 2.0;
            assert_relative_eq!(
                seq[1].as_matrix(),
                &(half * points.as_matrix()),
                epsilon = EPS
            );
        }
    }

    #[test]
    fn zero_steps_applies_full_transform() {
        let points = demo_points();
        let seq = generate(&example(), &points, 0).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0], apply(&example(), &points).unwrap());
    }

    #[test]
    fn steps_are_evenly_spaced() {
        let points = PointSet::from_points([[1.0, 1.0]]);
        let a = Matrix2::new(3.0, 0.0, 0.0, -1.0);
        let seq = stepwise(&a, &points, 4);
        let xs = seq.iter().map(|s| s.point(0).x).collect::<Vec<_>>();
        let ys = seq.iter().map(|s| s.point(0).y).collect::<Vec<_>>();
        assert_relative_eq!(&xs[..], &[1.0, 1.5, 2.0, 2.5, 3.0][..], epsilon = EPS);
        assert_relative_eq!(&ys[..], &[1.0, 0.5, 0.0, -0.5, -1.0][..], epsilon = EPS);
    }

    #[test]
    fn empty_point_set() {
        let points = PointSet::from_coords(&[], &[]).unwrap();
        let seq = generate(&example(), &points, 3).unwrap();
        assert_eq!(seq.len(), 4);
        assert!(seq.iter().all(PointSet::is_empty));
    }

    #[test]
    fn rejects_bad_matrix() {
        let points = demo_points();
        assert_eq!(
            generate(&DMatrix::zeros(3, 2), &points, 4),
            Err(DimensionError::Matrix {
                expected_rows: 2,
                expected_cols: 2,
                actual_rows: 3,
                actual_cols: 2,
            })
        );
        assert!(generate(&DMatrix::zeros(2, 3), &points, 4).is_err());
    }

    #[test]
    fn rejects_bad_points() {
        assert_eq!(
            PointSet::from_matrix(&DMatrix::zeros(3, 4)),
            Err(DimensionError::Points { actual: 3 })
        );
        assert_eq!(
            PointSet::from_coords(&[1.0, 2.0], &[1.0]),
            Err(DimensionError::CoordinateLengths { xs: 2, ys: 1 })
        );

        let m = dmatrix![1.0, 2.0, 3.0; 4.0, 5.0, 6.0];
        let points = PointSet::from_matrix(&m).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points.point(1), Vector2::new(2.0, 5.0));
    }

    #[test]
    fn grid_order() {
        let grid = PointSet::grid(&[0.0, 1.0], &[-1.0, 0.0, 1.0]);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.xs().collect::<Vec<_>>(), [0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(grid.ys().collect::<Vec<_>>(), [-1.0, 0.0, 1.0, -1.0, 0.0, 1.0]);
        assert_eq!(grid.max_abs(), 1.0);
    }
}
