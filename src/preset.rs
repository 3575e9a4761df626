//! Example transforms.

use std::{f64::consts::PI, fmt};

use nalgebra::{Matrix2, Vector2};

/// The transforms shown by the demo animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Maps `(1, 0)` to `(2, 1)` and `(0, 1)` to `(-1, 1)`.
    Example,
    /// Rotation by 60 degrees.
    Rotation,
    /// Shear along the x-axis.
    Shear,
    /// Swaps the x and y coordinates.
    Permutation,
    /// Projection onto the x-axis.
    Projection,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Example,
        Preset::Rotation,
        Preset::Shear,
        Preset::Permutation,
        Preset::Projection,
    ];

    /// Returns the transform matrix.
    pub fn matrix(self) -> Matrix2<f64> {
        match self {
            Preset::Example => from_columns([2.0, 1.0], [-1.0, 1.0]),
            Preset::Rotation => rotation(PI / 3.0),
            Preset::Shear => from_columns([1.0, 0.0], [2.0, 1.0]),
            Preset::Permutation => from_columns([0.0, 1.0], [1.0, 0.0]),
            Preset::Projection => from_columns([1.0, 0.0], [0.0, 0.0]),
        }
    }

    /// Returns a short lowercase name, usable in file names.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Example => "example",
            Preset::Rotation => "rotation",
            Preset::Shear => "shear",
            Preset::Permutation => "permutation",
            Preset::Projection => "projection",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds a matrix from its two columns, the images of the unit vectors.
pub fn from_columns(c0: [f64; 2], c1: [f64; 2]) -> Matrix2<f64> {
    Matrix2::from_columns(&[Vector2::from(c0), Vector2::from(c1)])
}

/// Counterclockwise rotation by `theta` radians.
pub fn rotation(theta: f64) -> Matrix2<f64> {
    let (sin, cos) = theta.sin_cos();
    from_columns([cos, sin], [-sin, cos])
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn example_maps_unit_vectors() {
        let a = Preset::Example.matrix();
        assert_eq!(a * Vector2::x(), Vector2::new(2.0, 1.0));
        assert_eq!(a * Vector2::y(), Vector2::new(-1.0, 1.0));
    }

    #[test]
    fn rotation_preserves_length() {
        let a = Preset::Rotation.matrix();
        let v = Vector2::new(3.0, -4.0);
        assert_relative_eq!((a * v).norm(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(a.determinant(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(rotation(PI / 2.0) * Vector2::x(), Vector2::y(), epsilon = 1e-12);
    }

    #[test]
    fn determinants() {
        assert_eq!(Preset::Shear.matrix().determinant(), 1.0);
        assert_eq!(Preset::Permutation.matrix().determinant(), -1.0);
        assert_eq!(Preset::Projection.matrix().determinant(), 0.0);
        assert_eq!(Preset::Example.matrix().determinant(), 3.0);
    }

    #[test]
    fn names_are_unique() {
        let mut names = Preset::ALL.iter().map(|p| p.name()).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Preset::ALL.len());
    }
}
