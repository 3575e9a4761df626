//! Rendering of transform sequences.

use std::time::Duration;

use crate::anim::{Animation, DEFAULT_FRAME_DELAY};
use crate::error::DimensionError;
use crate::image::{Color, Image};
use crate::plot::{Axes, Range};
use crate::transform::PointSet;

/// Axis limits are this much larger than the largest coordinate.
const LIMIT_PADDING: f64 = 1.1;

/// Options for rendering point sets.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub(crate) width: u32,
    pub(crate) height: u32,
    dot_diameter: u32,
    frame_delay: Duration,
    pub(crate) title: Option<String>,
    background: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            dot_diameter: 9,
            frame_delay: DEFAULT_FRAME_DELAY,
            title: None,
            background: Color::WHITE,
        }
    }
}

impl RenderOptions {
    /// Sets the size of the rendered images, in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the diameter of the dot drawn for each point, in pixels.
    pub fn dot_diameter(mut self, diameter: u32) -> Self {
        self.dot_diameter = diameter;
        self
    }

    /// Sets how long every animation frame is displayed.
    pub fn frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Sets the title drawn above the plot.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the background color. White by default.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    fn axes(&self, xlim: Range, ylim: Range) -> Axes {
        let axes = Axes::new(self.width, self.height, xlim, ylim).background(self.background);
        match &self.title {
            Some(title) => axes.title(title.clone()),
            None => axes,
        }
    }

    /// Like `axes`, but falls back to `default_title` when no title was configured.
    pub(crate) fn titled_axes(&self, xlim: Range, ylim: Range, default_title: &str) -> Axes {
        let axes = self.axes(xlim, ylim);
        match self.title {
            Some(_) => axes,
            None => axes.title(default_title),
        }
    }
}

/// Returns the symmetric range that fits every coordinate of every point set, with padding.
///
/// Sequences without any nonzero coordinate get the range `[-1.1, 1.1]`.
pub fn symmetric_limits<'a, I>(sets: I) -> Range
where
    I: IntoIterator<Item = &'a PointSet>,
{
    let max = sets
        .into_iter()
        .map(PointSet::max_abs)
        .fold(0.0, f64::max);
    let max = if max > 0.0 && max.is_finite() { max } else { 1.0 };
    Range::symmetric(LIMIT_PADDING * max).unwrap_or(Range::UNIT)
}

fn check_colors(points: &PointSet, colors: &[Color]) -> Result<(), DimensionError> {
    if points.len() != colors.len() {
        return Err(DimensionError::Colors {
            colors: colors.len(),
            points: points.len(),
        });
    }
    Ok(())
}

/// Renders one animation frame per point set.
///
/// All frames share the same axis limits (see [`symmetric_limits`]), so that the motion of the
/// points isn't obscured by a moving camera. `colors` must contain one color per point; all point
/// sets in `seq` are expected to have the same number of points.
pub fn render_sequence(
    seq: &[PointSet],
    colors: &[Color],
    opts: &RenderOptions,
) -> Result<Animation, DimensionError> {
    for set in seq {
        check_colors(set, colors)?;
    }

    let lim = symmetric_limits(seq);
    let axes = opts.axes(lim, lim);
    log::debug!(
        "rendering {} frames at {}x{}, limits {:?}",
        seq.len(),
        opts.width,
        opts.height,
        lim
    );

    let frames = seq.iter().map(|set| {
        let mut image = axes.render();
        axes.scatter(&mut image, set, colors, opts.dot_diameter);
        (image, opts.frame_delay)
    });
    Ok(Animation::from_frames(frames))
}

/// Renders a single point set with equal axis scaling.
pub fn render_still(
    points: &PointSet,
    colors: &[Color],
    opts: &RenderOptions,
) -> Result<Image, DimensionError> {
    check_colors(points, colors)?;

    let lim = symmetric_limits([points]);
    let axes = opts.axes(lim, lim).equal_aspect();
    let mut image = axes.render();
    axes.scatter(&mut image, points, colors, opts.dot_diameter);
    Ok(image)
}
