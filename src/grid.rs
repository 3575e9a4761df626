//! Point grids and their colors.

use crate::image::Color;
use crate::transform::PointSet;

/// Returns `num` evenly spaced values from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            // Pin the last value so it doesn't drift from `stop` due to rounding.
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// The 9x7 grid spanning `[-4, 4] x [-3, 3]` used by the transform demos.
pub fn demo_grid() -> PointSet {
    PointSet::grid(&linspace(-4.0, 4.0, 9), &linspace(-3.0, 3.0, 7))
}

/// Maps a position in the demo grid to a color.
///
/// Red fades out towards the top, green towards the bottom, and blue increases from left to right,
/// so every point of the grid can be followed through a transform.
pub fn colorize(x: f64, y: f64) -> Color {
    let r = f64::min(1.0, 1.0 - y / 3.0);
    let g = f64::min(1.0, 1.0 + y / 3.0);
    let b = 0.25 + x / 16.0;
    Color::from_rgb_f64(r, g, b)
}

/// Assigns a color to every point of `points` with [`colorize`].
pub fn colors(points: &PointSet) -> Vec<Color> {
    points.points().map(|p| colorize(p.x, p.y)).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 0), Vec::<f64>::new());
        assert_eq!(linspace(2.0, 5.0, 1), [2.0]);
        assert_eq!(linspace(-4.0, 4.0, 9), [-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]);

        let v = linspace(-3.0, 3.0, 31);
        assert_eq!(v.len(), 31);
        assert_eq!(v[0], -3.0);
        assert_eq!(v[30], 3.0);
        assert_relative_eq!(v[15], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn demo_grid_shape() {
        let grid = demo_grid();
        assert_eq!(grid.len(), 63);
        assert_eq!(grid.point(0), nalgebra::Vector2::new(-4.0, -3.0));
        assert_eq!(grid.point(1), nalgebra::Vector2::new(-4.0, -2.0));
        assert_eq!(grid.point(62), nalgebra::Vector2::new(4.0, 3.0));
        assert_eq!(grid.max_abs(), 4.0);
    }

    #[test]
    fn colorizer() {
        // Bottom-left corner is fully red, top-right is fully green.
        assert_eq!(colorize(-4.0, -3.0), Color::from_rgb_f64(1.0, 0.0, 0.0));
        assert_eq!(colorize(4.0, 3.0), Color::from_rgb_f64(0.0, 1.0, 0.5));
        assert_eq!(colorize(0.0, 0.0), Color::from_rgb_f64(1.0, 1.0, 0.25));

        let grid = demo_grid();
        let colors = colors(&grid);
        assert_eq!(colors.len(), grid.len());
        assert_ne!(colors[0], colors[62]);
    }
}
