//! Error types for the numeric parts of linviz.

use thiserror::Error;

/// Input had the wrong shape for the requested operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    /// A matrix did not have the required number of rows and columns.
    #[error("expected a {expected_rows}x{expected_cols} matrix, got {actual_rows}x{actual_cols}")]
    Matrix {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// Point coordinates were not 2D.
    #[error("points must have 2 coordinates, got {actual}")]
    Points { actual: usize },

    /// Parallel coordinate arrays had different lengths.
    #[error("coordinate arrays differ in length: {xs} x-values, {ys} y-values")]
    CoordinateLengths { xs: usize, ys: usize },

    /// A vector did not have the required length.
    #[error("expected a vector of length {expected}, got {actual}")]
    Vector { expected: usize, actual: usize },

    /// The number of colors does not match the number of points.
    #[error("{colors} colors given for {points} points")]
    Colors { colors: usize, points: usize },
}

/// Errors produced while setting up, solving or plotting a linear system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SystemError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Range(#[from] RangeError),

    /// Only 2x2 and 3x3 systems are supported.
    #[error("unsupported system size {0} (must be 2 or 3)")]
    UnsupportedSize(usize),

    /// The coefficient matrix has no inverse.
    #[error("coefficient matrix is singular")]
    Singular,
}

/// An axis range that can't be plotted.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid axis range [{min}, {max}] (bounds must be finite and min < max)")]
pub struct RangeError {
    pub min: f64,
    pub max: f64,
}

/// Result type for operations that only fail on malformed dimensions.
pub type Result<T> = std::result::Result<T, DimensionError>;
