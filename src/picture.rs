//! Row and column pictures of linear systems.
//!
//! * The *row picture* draws every equation on its own: a line in 2D, a plane in 3D. The solution
//!   is where they all intersect.
//! * The *column picture* reads `A x = b` as "which combination of the columns of `A` yields `b`?"
//!   and draws the columns and the combination as arrows.
//! * The *column space* picture applies `A` to a whole grid of coefficients, showing how the
//!   combinations of the columns fill the plane.

use nalgebra::{Vector2, Vector3};

use crate::error::{DimensionError, SystemError};
use crate::grid::linspace;
use crate::image::{draw, Color, Image};
use crate::plot::{Axes, Axes3, Range};
use crate::render::{symmetric_limits, RenderOptions};
use crate::system::LinearSystem;
use crate::transform::{self, PointSet};

/// Coefficients with a smaller magnitude are treated as zero when drawing equations.
const EPS: f64 = 1e-12;

/// Smallest half-width of the 2D row picture around the solution.
const ROW_PICTURE_HALF_WIDTH: f64 = 5.0;
/// Smallest half-width of the 3D row picture around the solution, along every axis.
const ROW_PICTURE_3D_HALF_WIDTH: f64 = 3.0;
/// Number of wireframe lines per direction on each plane.
const PLANE_LINES: usize = 5;

const NAMES_2D: [&str; 2] = ["x", "y"];
const NAMES_3D: [&str; 3] = ["u", "v", "w"];

/// Vertical distance between legend lines, in pixels.
const LEGEND_LINE_HEIGHT: i32 = 12;

fn require_size(sys: &LinearSystem, n: usize) -> Result<(), SystemError> {
    if sys.size() != n {
        return Err(DimensionError::Matrix {
            expected_rows: n,
            expected_cols: n,
            actual_rows: sys.size(),
            actual_cols: sys.size(),
        }
        .into());
    }
    Ok(())
}

fn palette(i: usize) -> Color {
    Color::CYCLE[i % Color::CYCLE.len()]
}

/// Formats a number with up to 3 decimals, dropping trailing zeros.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Formats one equation, eg. `2x - y = 1`.
///
/// Zero coefficients are left out, coefficients of magnitude 1 are not printed.
pub fn format_equation(coeffs: &[f64], names: &[&str], rhs: f64) -> String {
    let mut out = String::new();
    for (&c, name) in coeffs.iter().zip(names) {
        if c == 0.0 {
            continue;
        }
        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }
        if c.abs() != 1.0 {
            out.push_str(&fmt_num(c.abs()));
        }
        out.push_str(name);
    }
    if out.is_empty() {
        out.push('0');
    }
    format!("{out} = {}", fmt_num(rhs))
}

/// Draws one line of text per entry in `lines`, starting at the top left pixel `(x, y)`.
fn legend(image: &mut Image, x: i32, y: i32, lines: &[(String, Color)]) {
    for (i, (text, color)) in lines.iter().enumerate() {
        draw::text(image, x, y + i as i32 * LEGEND_LINE_HEIGHT, text)
            .color(*color)
            .align_left()
            .align_top();
    }
}

/// Draws a text label next to a point in data space, offset up and to the right.
fn tip_label(axes: &Axes, image: &mut Image, at: Vector2<f64>, text: &str, color: Color) {
    let p = axes.to_pixel(at);
    draw::text(image, p.x as i32 + 6, p.y as i32 - 6, text)
        .color(color)
        .align_left()
        .align_bottom();
}

fn equation_legend(sys: &LinearSystem, names: &[&str]) -> Vec<(String, Color)> {
    (0..sys.size())
        .map(|i| {
            let (coeffs, rhs) = sys.equation(i);
            (format_equation(&coeffs, names, rhs), palette(i))
        })
        .collect()
}

/// Returns limits around the bounding box of `points`, padded by 15% and at least `[-1, 1]`.
fn bounding_limits(points: &[Vector2<f64>]) -> Result<(Range, Range), SystemError> {
    let (mut min, mut max) = (Vector2::repeat(-1.0), Vector2::repeat(1.0));
    for p in points {
        min = min.inf(p);
        max = max.sup(p);
    }
    let pad = (max - min) * 0.15;
    let (min, max) = (min - pad, max + pad);
    Ok((Range::new(min.x, max.x)?, Range::new(min.y, max.y)?))
}

/// Draws each equation of a 2x2 system as a line, and marks their intersection.
///
/// Singular systems are drawn too, but without an intersection.
pub fn row_picture_2d(sys: &LinearSystem, opts: &RenderOptions) -> Result<Image, SystemError> {
    require_size(sys, 2)?;

    let solution = match sys.solve() {
        Ok(x) => Some(Vector2::new(x[0], x[1])),
        Err(SystemError::Singular) => {
            log::debug!("system is singular, drawing lines without an intersection");
            None
        }
        Err(e) => return Err(e),
    };
    let center = solution.unwrap_or_else(Vector2::zeros);
    let half = ROW_PICTURE_HALF_WIDTH.max(1.5 * center.amax());
    let xlim = Range::new(center.x - half, center.x + half)?;
    let ylim = Range::new(center.y - half, center.y + half)?;
    let axes = opts.titled_axes(xlim, ylim, "2d row picture").equal_aspect();
    let (xlim, ylim) = (axes.xlim(), axes.ylim());

    let mut image = axes.render();
    for i in 0..2 {
        let (a, b) = sys.equation(i);
        let (from, to) = if a[1].abs() > EPS {
            let y = |x: f64| (b - a[0] * x) / a[1];
            (
                Vector2::new(xlim.min(), y(xlim.min())),
                Vector2::new(xlim.max(), y(xlim.max())),
            )
        } else if a[0].abs() > EPS {
            let x = b / a[0];
            (Vector2::new(x, ylim.min()), Vector2::new(x, ylim.max()))
        } else {
            log::warn!("equation {} has no nonzero coefficients, not drawing it", i + 1);
            continue;
        };

        if let Some((from, to)) = axes.clip(from, to) {
            axes.line(&mut image, from, to)
                .color(palette(i))
                .stroke_width(2);
        }
    }

    if let Some(x) = solution {
        axes.dot(&mut image, x, 9).color(Color::PALETTE_RED);
        let text = format!("({}, {})", fmt_num(x.x), fmt_num(x.y));
        tip_label(&axes, &mut image, x, &text, Color::PALETTE_RED);
    }

    let corner = axes.to_pixel(Vector2::new(xlim.min(), ylim.max()));
    legend(
        &mut image,
        corner.x as i32 + 5,
        corner.y as i32 + 5,
        &equation_legend(sys, &NAMES_2D),
    );

    Ok(image)
}

/// Draws the columns `v1`, `v2` of a 2x2 system and the combination `x1 v1 + x2 v2 = b`.
///
/// Fails with [`SystemError::Singular`] if no such combination exists.
pub fn column_picture_2d(sys: &LinearSystem, opts: &RenderOptions) -> Result<Image, SystemError> {
    require_size(sys, 2)?;

    let x = sys.solve()?;
    let v1 = Vector2::new(sys.column(0)[0], sys.column(0)[1]);
    let v2 = Vector2::new(sys.column(1)[0], sys.column(1)[1]);
    let b = Vector2::new(sys.rhs()[0], sys.rhs()[1]);
    let partial = v1 * x[0];

    let (xlim, ylim) = bounding_limits(&[Vector2::zeros(), v1, v2, partial, b])?;
    let axes = opts
        .titled_axes(xlim, ylim, "2d column picture")
        .equal_aspect();
    let mut image = axes.render();

    let origin = Vector2::zeros();
    // Construction lines first, so the labelled arrows are drawn on top.
    axes.arrow(&mut image, origin, partial).color(Color::GRAY);
    axes.arrow(&mut image, partial, b).color(Color::GRAY);
    axes.arrow(&mut image, origin, v1)
        .color(Color::PALETTE_BLUE)
        .stroke_width(2);
    axes.arrow(&mut image, origin, v2)
        .color(Color::PALETTE_ORANGE)
        .stroke_width(2);
    axes.arrow(&mut image, origin, b)
        .color(Color::PALETTE_RED)
        .stroke_width(2);

    tip_label(&axes, &mut image, v1, "v1", Color::PALETTE_BLUE);
    tip_label(&axes, &mut image, v2, "v2", Color::PALETTE_ORANGE);
    let combination = format!("{} v1 + {} v2", fmt_num(x[0]), fmt_num(x[1]));
    tip_label(&axes, &mut image, b, &combination, Color::PALETTE_RED);

    Ok(image)
}

/// Applies the coefficient matrix of a 2x2 system to a grid of coefficients in `[-3, 3]^2` and
/// draws the resulting combinations of its columns.
pub fn column_space_2d(sys: &LinearSystem, opts: &RenderOptions) -> Result<Image, SystemError> {
    require_size(sys, 2)?;

    let a = transform::to_matrix2(sys.matrix())?;
    let coeffs = linspace(-3.0, 3.0, 31);
    let combinations = PointSet::grid(&coeffs, &coeffs).transformed(&a);
    let v1 = a.column(0).into_owned();
    let v2 = a.column(1).into_owned();

    let lim = symmetric_limits([&combinations]);
    let axes = opts
        .titled_axes(lim, lim, "Column space visualization")
        .equal_aspect();
    let mut image = axes.render();

    let colors = vec![Color::PALETTE_GREEN; combinations.len()];
    axes.scatter(&mut image, &combinations, &colors, 3);

    let origin = Vector2::zeros();
    axes.arrow(&mut image, origin, v1)
        .color(Color::PALETTE_BLUE)
        .stroke_width(2);
    axes.arrow(&mut image, origin, v2)
        .color(Color::PALETTE_ORANGE)
        .stroke_width(2);
    tip_label(&axes, &mut image, v1, "v1", Color::PALETTE_BLUE);
    tip_label(&axes, &mut image, v2, "v2", Color::PALETTE_ORANGE);

    Ok(image)
}

/// Draws each equation of a 3x3 system as a wireframe plane, and marks their intersection.
pub fn row_picture_3d(sys: &LinearSystem, opts: &RenderOptions) -> Result<Image, SystemError> {
    require_size(sys, 3)?;

    let solution = match sys.solve() {
        Ok(x) => Some(Vector3::new(x[0], x[1], x[2])),
        Err(SystemError::Singular) => {
            log::debug!("system is singular, drawing planes without an intersection");
            None
        }
        Err(e) => return Err(e),
    };
    let center = solution.unwrap_or_else(Vector3::zeros);
    let mut bounds = [Range::UNIT; 3];
    for (axis, bound) in bounds.iter_mut().enumerate() {
        let half = ROW_PICTURE_3D_HALF_WIDTH.max(1.5 * center[axis].abs());
        *bound = Range::new(center[axis] - half, center[axis] + half)?;
    }

    let title = opts.title.as_deref().unwrap_or("3d row picture");
    let axes = Axes3::new(opts.width, opts.height, bounds).title(title);
    let mut image = axes.render(NAMES_3D);

    for e in 0..3 {
        let (a, b) = sys.equation(e);
        // Solve for the coordinate with the largest coefficient, so the plane stays steep
        // enough to fit the box.
        let Some(k) = (0..3)
            .filter(|&k| a[k].abs() > EPS)
            .max_by(|&i, &j| a[i].abs().total_cmp(&a[j].abs()))
        else {
            log::warn!("equation {} has no nonzero coefficients, not drawing it", e + 1);
            continue;
        };
        let (i, j) = ((k + 1) % 3, (k + 2) % 3);
        let point = |pi: f64, pj: f64| {
            let mut p = Vector3::zeros();
            p[i] = pi;
            p[j] = pj;
            p[k] = (b - a[i] * pi - a[j] * pj) / a[k];
            p
        };

        let (bi, bj) = (bounds[i], bounds[j]);
        for s in linspace(bi.min(), bi.max(), PLANE_LINES) {
            axes.line(&mut image, point(s, bj.min()), point(s, bj.max()))
                .color(palette(e));
        }
        for s in linspace(bj.min(), bj.max(), PLANE_LINES) {
            axes.line(&mut image, point(bi.min(), s), point(bi.max(), s))
                .color(palette(e));
        }
    }

    if let Some(x) = solution {
        axes.marker(&mut image, x).color(Color::BLACK).size(7);
        let text = format!("({}, {}, {})", fmt_num(x.x), fmt_num(x.y), fmt_num(x.z));
        let bottom = image.height() as i32 - 5;
        draw::text(&mut image, 5, bottom, &text)
            .color(Color::BLACK)
            .align_left()
            .align_bottom();
    }

    legend(&mut image, 5, 20, &equation_legend(sys, &NAMES_3D));

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(image: &Image, color: Color) -> usize {
        let mut n = 0;
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.get(x, y) == color {
                    n += 1;
                }
            }
        }
        n
    }

    fn small() -> RenderOptions {
        RenderOptions::default().size(160, 160)
    }

    #[test]
    fn equations_format() {
        assert_eq!(format_equation(&[2.0, -1.0], &NAMES_2D, 1.0), "2x - y = 1");
        assert_eq!(format_equation(&[1.0, 1.0], &NAMES_2D, 5.0), "x + y = 5");
        assert_eq!(format_equation(&[2.0, 1.0, 1.0], &NAMES_3D, 5.0), "2u + v + w = 5");
        assert_eq!(format_equation(&[4.0, -6.0, 0.0], &NAMES_3D, -2.0), "4u - 6v = -2");
        assert_eq!(
            format_equation(&[-2.0, 7.0, 2.0], &NAMES_3D, 9.0),
            "-2u + 7v + 2w = 9"
        );
        assert_eq!(format_equation(&[0.0, -0.5], &NAMES_2D, 0.25), "-0.5y = 0.25");
        assert_eq!(format_equation(&[0.0, 0.0], &NAMES_2D, 0.0), "0 = 0");
    }

    #[test]
    fn numbers_format() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-2.5), "-2.5");
    }

    #[test]
    fn row_picture_draws_both_lines() {
        let image = row_picture_2d(&LinearSystem::demo_2d(), &small()).unwrap();
        assert_eq!(image.width(), 160);
        assert!(count(&image, palette(0)) > 20);
        assert!(count(&image, palette(1)) > 20);
        assert!(count(&image, Color::PALETTE_RED) > 0);
    }

    #[test]
    fn row_picture_of_singular_system() {
        let sys = LinearSystem::from_rows(&[1.0, 1.0, 2.0, 2.0], &[1.0, 4.0]).unwrap();
        let image = row_picture_2d(&sys, &small()).unwrap();
        assert!(count(&image, palette(0)) > 20);
        assert!(count(&image, palette(1)) > 20);
    }

    #[test]
    fn vertical_lines() {
        let sys = LinearSystem::from_rows(&[1.0, 0.0, 0.0, 1.0], &[2.0, -1.0]).unwrap();
        let image = row_picture_2d(&sys, &small()).unwrap();
        assert!(count(&image, palette(0)) > 20);
    }

    #[test]
    fn column_pictures() {
        let sys = LinearSystem::demo_2d();
        let image = column_picture_2d(&sys, &small()).unwrap();
        assert!(count(&image, Color::PALETTE_BLUE) > 0);
        assert!(count(&image, Color::PALETTE_ORANGE) > 0);
        assert!(count(&image, Color::PALETTE_RED) > 0);

        let image = column_space_2d(&sys, &small()).unwrap();
        assert!(count(&image, Color::PALETTE_GREEN) > 100);
    }

    #[test]
    fn column_picture_needs_a_solution() {
        let sys = LinearSystem::from_rows(&[1.0, 2.0, 2.0, 4.0], &[1.0, 1.0]).unwrap();
        assert_eq!(
            column_picture_2d(&sys, &small()).unwrap_err(),
            SystemError::Singular
        );
        // The column space of a singular matrix is still a (degenerate) picture.
        assert!(column_space_2d(&sys, &small()).is_ok());
    }

    #[test]
    fn wrong_sizes() {
        let sys3 = LinearSystem::demo_3d();
        assert!(row_picture_2d(&sys3, &small()).is_err());
        assert!(column_picture_2d(&sys3, &small()).is_err());
        assert!(column_space_2d(&sys3, &small()).is_err());
        assert!(matches!(
            row_picture_3d(&LinearSystem::demo_2d(), &small()),
            Err(SystemError::Dimension(DimensionError::Matrix {
                expected_rows: 3,
                ..
            }))
        ));
    }

    /// Counts black pixels in the bottom left corner, where the 3D solution is printed.
    fn solution_text_pixels(image: &Image) -> usize {
        let mut n = 0;
        for y in image.height() - 16..image.height() {
            for x in 0..image.width() / 2 {
                if image.get(x, y) == Color::BLACK {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn row_picture_3d_draws_planes() {
        let image = row_picture_3d(&LinearSystem::demo_3d(), &small()).unwrap();
        for i in 0..3 {
            assert!(count(&image, palette(i)) > 20, "plane {i} missing");
        }
        assert!(solution_text_pixels(&image) > 0);
    }

    #[test]
    fn row_picture_3d_of_singular_system() {
        // The third plane is parallel to the line where the first two meet.
        let sys = LinearSystem::from_rows(
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0],
            &[1.0, 1.0, 3.0],
        )
        .unwrap();
        assert_eq!(sys.solve(), Err(SystemError::Singular));

        let image = row_picture_3d(&sys, &small()).unwrap();
        for i in 0..3 {
            assert!(count(&image, palette(i)) > 20, "plane {i} missing");
        }
        assert_eq!(solution_text_pixels(&image), 0);
    }
}
