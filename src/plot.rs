//! Plot axes.
//!
//! [`Axes`] maps data coordinates to the pixels of an [`Image`] and draws the usual decorations
//! (background, grid lines, coordinate axes, tick labels and a title). Data-space objects are then
//! drawn through the axes with the same guard-based API as [`draw`].
//!
//! [`Axes3`] builds on top of that with a fixed orthographic camera for 3D wireframes.

use itertools::Itertools;
use nalgebra::{Vector2, Vector3};

use crate::error::RangeError;
use crate::image::{
    draw::{self, DrawArrow, DrawCircle, DrawLine, DrawMarker, DrawText},
    Color, Image,
};
use crate::transform::PointSet;

/// Roughly how many grid lines to draw along each axis.
const TARGET_TICKS: f64 = 8.0;

/// A closed interval of data coordinates, `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// The range `[-1, 1]`.
    pub const UNIT: Range = Range {
        min: -1.0,
        max: 1.0,
    };

    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(RangeError { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates the range `[-extent, extent]`.
    pub fn symmetric(extent: f64) -> Result<Self, RangeError> {
        Self::new(-extent, extent)
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    fn with_span(&self, span: f64) -> Self {
        let c = self.center();
        Self {
            min: c - span / 2.0,
            max: c + span / 2.0,
        }
    }

    /// Returns "nice" tick positions inside this range.
    ///
    /// Ticks are spaced by 1, 2 or 5 times a power of ten.
    pub fn ticks(&self) -> Vec<f64> {
        let step = self.tick_step();
        let first = (self.min / step - 1e-9).ceil() as i64;
        let last = (self.max / step + 1e-9).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }

    fn tick_step(&self) -> f64 {
        let raw = self.span() / TARGET_TICKS;
        let magnitude = 10f64.powf(raw.log10().floor());
        [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .map(|m| m * magnitude)
            .find(|&s| s >= raw)
            .unwrap_or(10.0 * magnitude)
    }

    fn format_tick(&self, v: f64) -> String {
        let step = self.tick_step();
        let decimals = (-(step.log10() + 1e-9).floor()).max(0.0) as usize;
        // Avoid printing "-0".
        let v = if v.abs() < step * 1e-9 { 0.0 } else { v };
        format!("{:.*}", decimals, v)
    }
}

/// A 2D coordinate system drawn into an image.
#[derive(Debug, Clone)]
pub struct Axes {
    width: u32,
    height: u32,
    margin: u32,
    xlim: Range,
    ylim: Range,
    title: Option<String>,
    background: Color,
    grid_color: Color,
    axis_color: Color,
}

impl Axes {
    /// Creates axes covering a `width x height` image.
    ///
    /// The default margin is 30 pixels on every side.
    pub fn new(width: u32, height: u32, xlim: Range, ylim: Range) -> Self {
        Self {
            width,
            height,
            margin: 30,
            xlim,
            ylim,
            title: None,
            background: Color::WHITE,
            grid_color: Color::LIGHT_GRAY,
            axis_color: Color::GRAY,
        }
    }

    /// Sets the empty border around the plot area, in pixels.
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the title drawn above the plot area.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the background color.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Widens one of the ranges so that one unit has the same length in pixels along both axes.
    ///
    /// Both ranges keep their centers.
    pub fn equal_aspect(mut self) -> Self {
        let (pw, ph) = self.plot_size();
        let x_scale = pw / self.xlim.span();
        let y_scale = ph / self.ylim.span();
        if x_scale > y_scale {
            self.xlim = self.xlim.with_span(pw / y_scale);
        } else {
            self.ylim = self.ylim.with_span(ph / x_scale);
        }
        self
    }

    #[inline]
    pub fn xlim(&self) -> Range {
        self.xlim
    }

    #[inline]
    pub fn ylim(&self) -> Range {
        self.ylim
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn plot_size(&self) -> (f64, f64) {
        let pw = self.width.saturating_sub(2 * self.margin).max(1);
        let ph = self.height.saturating_sub(2 * self.margin).max(1);
        (pw as f64, ph as f64)
    }

    /// Maps a point in data space to (sub)pixel coordinates.
    ///
    /// Y points up in data space and down in the image.
    pub fn to_pixel(&self, p: Vector2<f64>) -> Vector2<f64> {
        let (pw, ph) = self.plot_size();
        let m = self.margin as f64;
        let x = m + (p.x - self.xlim.min) / self.xlim.span() * pw;
        let y = m + ph - (p.y - self.ylim.min) / self.ylim.span() * ph;
        Vector2::new(x, y)
    }

    /// Clips the segment between `from` and `to` to the visible data range.
    ///
    /// Returns `None` if no part of the segment is visible.
    pub fn clip(
        &self,
        from: Vector2<f64>,
        to: Vector2<f64>,
    ) -> Option<(Vector2<f64>, Vector2<f64>)> {
        let d = to - from;
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [
            (-d.x, from.x - self.xlim.min),
            (d.x, self.xlim.max - from.x),
            (-d.y, from.y - self.ylim.min),
            (d.y, self.ylim.max - from.y),
        ] {
            if p == 0.0 {
                // Parallel to this edge; entirely outside or irrelevant.
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        Some((from + d * t0, from + d * t1))
    }

    fn to_pixel_i32(&self, p: Vector2<f64>) -> (i32, i32) {
        let p = self.to_pixel(p);
        (p.x.round() as i32, p.y.round() as i32)
    }

    /// Creates a blank image and draws the axes' decorations onto it.
    pub fn render(&self) -> Image {
        let mut image = Image::new(self.width, self.height);
        self.draw_frame(&mut image);
        image
    }

    /// Clears `image` and draws grid lines, the coordinate axes, tick labels and the title.
    pub fn draw_frame(&self, image: &mut Image) {
        image.clear(self.background);

        let (left, top) = self.to_pixel_i32(Vector2::new(self.xlim.min, self.ylim.max));
        let (right, bottom) = self.to_pixel_i32(Vector2::new(self.xlim.max, self.ylim.min));

        for x in self.xlim.ticks() {
            let (px, _) = self.to_pixel_i32(Vector2::new(x, 0.0));
            let color = if x == 0.0 { self.axis_color } else { self.grid_color };
            draw::line(image, px, top, px, bottom).color(color);
            let label = self.xlim.format_tick(x);
            draw::text(image, px, bottom + 3, &label)
                .color(Color::GRAY)
                .align_top();
        }
        for y in self.ylim.ticks() {
            let (_, py) = self.to_pixel_i32(Vector2::new(0.0, y));
            let color = if y == 0.0 { self.axis_color } else { self.grid_color };
            draw::line(image, left, py, right, py).color(color);
            let label = self.ylim.format_tick(y);
            draw::text(image, left - 3, py, &label)
                .color(Color::GRAY)
                .align_right();
        }

        for ((x0, y0), (x1, y1)) in [(left, top), (right, top), (right, bottom), (left, bottom)]
            .into_iter()
            .circular_tuple_windows()
        {
            draw::line(image, x0, y0, x1, y1).color(Color::GRAY);
        }

        if let Some(title) = &self.title {
            draw::text(image, self.width as i32 / 2, (self.margin / 2) as i32, title)
                .color(Color::BLACK);
        }
    }

    /// Draws every point of `points` as a dot, colored by the matching entry of `colors`.
    ///
    /// # Panics
    ///
    /// Panics if `colors` doesn't have one entry per point.
    pub fn scatter(&self, image: &mut Image, points: &PointSet, colors: &[Color], diameter: u32) {
        assert_eq!(
            points.len(),
            colors.len(),
            "scatter plot needs exactly one color per point"
        );
        for (p, &color) in points.points().zip(colors) {
            let (x, y) = self.to_pixel_i32(p);
            draw::dot(image, x, y, diameter).color(color);
        }
    }

    /// Draws a single dot at `p`.
    pub fn dot<'a>(&self, image: &'a mut Image, p: Vector2<f64>, diameter: u32) -> DrawCircle<'a> {
        let (x, y) = self.to_pixel_i32(p);
        draw::dot(image, x, y, diameter)
    }

    /// Draws a line segment between two points in data space.
    pub fn line<'a>(
        &self,
        image: &'a mut Image,
        from: Vector2<f64>,
        to: Vector2<f64>,
    ) -> DrawLine<'a> {
        let (x0, y0) = self.to_pixel_i32(from);
        let (x1, y1) = self.to_pixel_i32(to);
        draw::line(image, x0, y0, x1, y1)
    }

    /// Draws an arrow between two points in data space, with the head at `to`.
    pub fn arrow<'a>(
        &self,
        image: &'a mut Image,
        from: Vector2<f64>,
        to: Vector2<f64>,
    ) -> DrawArrow<'a> {
        draw::arrow(image, self.to_pixel(from), self.to_pixel(to))
    }

    /// Draws a marker at a point in data space.
    pub fn marker<'a>(&self, image: &'a mut Image, p: Vector2<f64>) -> DrawMarker<'a> {
        let (x, y) = self.to_pixel_i32(p);
        draw::marker(image, x, y)
    }

    /// Draws text at a point in data space.
    pub fn label<'a>(&self, image: &'a mut Image, p: Vector2<f64>, text: &'a str) -> DrawText<'a> {
        let (x, y) = self.to_pixel_i32(p);
        draw::text(image, x, y, text)
    }
}

/// A fixed orthographic camera looking at a box in 3D data space.
///
/// The data box is normalized to `[-1, 1]` along every axis before projection, so every axis gets
/// the same screen space regardless of its range. The third coordinate points up.
#[derive(Debug, Clone)]
pub struct Axes3 {
    axes: Axes,
    bounds: [Range; 3],
    right: Vector3<f64>,
    up: Vector3<f64>,
}

impl Axes3 {
    /// Default camera elevation, in degrees.
    pub const ELEVATION: f64 = 30.0;
    /// Default camera azimuth, in degrees.
    pub const AZIMUTH: f64 = -60.0;

    pub fn new(width: u32, height: u32, bounds: [Range; 3]) -> Self {
        // The normalized box fits into a sphere of radius sqrt(3), so the projection always does
        // too.
        let r = 3f64.sqrt() * 1.05;
        let lim = Range { min: -r, max: r };
        let mut this = Self {
            axes: Axes::new(width, height, lim, lim).equal_aspect(),
            bounds,
            right: Vector3::zeros(),
            up: Vector3::zeros(),
        };
        this.set_view(Self::ELEVATION, Self::AZIMUTH);
        this
    }

    /// Sets the camera direction, in degrees.
    pub fn view(mut self, elevation: f64, azimuth: f64) -> Self {
        self.set_view(elevation, azimuth);
        self
    }

    fn set_view(&mut self, elevation: f64, azimuth: f64) {
        let (se, ce) = elevation.to_radians().sin_cos();
        let (sa, ca) = azimuth.to_radians().sin_cos();
        self.right = Vector3::new(-sa, ca, 0.0);
        self.up = Vector3::new(-se * ca, -se * sa, ce);
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.axes = self.axes.title(title);
        self
    }

    /// Projects a point in data space onto the 2D plane of the underlying [`Axes`].
    pub fn project(&self, p: Vector3<f64>) -> Vector2<f64> {
        let n = Vector3::from_fn(|i, _| {
            (p[i] - self.bounds[i].center()) / (self.bounds[i].span() / 2.0)
        });
        Vector2::new(n.dot(&self.right), n.dot(&self.up))
    }

    /// Creates a blank image and draws the bounding box with its axis labels.
    pub fn render(&self, names: [&str; 3]) -> Image {
        let mut image = Image::new(self.axes.width(), self.axes.height());
        image.clear(self.axes.background);

        let corner = |i: usize| {
            Vector3::from_fn(|axis, _| {
                if i & (1 << axis) != 0 {
                    self.bounds[axis].max
                } else {
                    self.bounds[axis].min
                }
            })
        };
        for i in 0..8usize {
            for axis in 0..3 {
                let j = i | (1 << axis);
                if j != i {
                    self.line(&mut image, corner(i), corner(j))
                        .color(Color::LIGHT_GRAY);
                }
            }
        }

        for (axis, name) in names.into_iter().enumerate() {
            let mut end = corner(0);
            end[axis] = self.bounds[axis].max + self.bounds[axis].span() * 0.12;
            let text_pos = self.project(end);
            self.axes
                .label(&mut image, text_pos, name)
                .color(Color::GRAY);
        }

        if let Some(title) = &self.axes.title {
            draw::text(
                &mut image,
                self.axes.width() as i32 / 2,
                (self.axes.margin / 2) as i32,
                title,
            )
            .color(Color::BLACK);
        }

        image
    }

    pub fn line<'a>(
        &self,
        image: &'a mut Image,
        from: Vector3<f64>,
        to: Vector3<f64>,
    ) -> DrawLine<'a> {
        self.axes.line(image, self.project(from), self.project(to))
    }

    pub fn marker<'a>(&self, image: &'a mut Image, p: Vector3<f64>) -> DrawMarker<'a> {
        self.axes.marker(image, self.project(p))
    }
}
