//! Drawing primitives.
//!
//! Every function returns a guard that draws the shape when dropped, so it can be customized with
//! chained setters first:
//!
//! ```no_run
//! # use linviz::image::{draw, Color, Image};
//! let mut image = Image::new(64, 64);
//! draw::line(&mut image, 0, 0, 63, 63).color(Color::RED).stroke_width(2);
//! ```
//!
//! Pixels that fall outside of the image are silently discarded.

use std::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{ascii, MonoTextStyle},
    prelude::*,
    primitives::{self, Line, PrimitiveStyle, Rectangle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use nalgebra::Vector2;

use crate::image::{Color, Image};

/// Guard returned by [`marker`]; draws the marker when dropped and allows customization.
pub struct DrawMarker<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    color: Color,
    size: u32,
}

impl<'a> DrawMarker<'a> {
    /// Sets the marker's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the width and height of the marker.
    ///
    /// The default size is 5. The size must be *uneven* and *non-zero*. A size of 1 will result in
    /// a single pixel getting drawn.
    pub fn size(&mut self, size: u32) -> &mut Self {
        assert!(size != 0, "marker size must be greater than zero");
        assert!(size % 2 == 1, "marker size must be an uneven number");
        self.size = size;
        self
    }
}

impl Drop for DrawMarker<'_> {
    fn drop(&mut self) {
        let offset = ((self.size - 1) / 2) as i32;
        for (xoff, yoff) in (-offset..=offset)
            .zip(-offset..=offset)
            .chain((-offset..=offset).rev().zip(-offset..=offset))
        {
            match Pixel(
                Point {
                    x: self.x + xoff,
                    y: self.y + yoff,
                },
                self.color,
            )
            .draw(&mut Target(&mut *self.image))
            {
                Ok(_) => {}
                Err(infallible) => match infallible {},
            }
        }
    }
}

/// Guard returned by [`line`][line()]; draws the line when dropped and allows customization.
pub struct DrawLine<'a> {
    image: &'a mut Image,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
    color: Color,
    stroke_width: u32,
}

impl<'a> DrawLine<'a> {
    /// Sets the line's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the line's stroke width.
    ///
    /// By default, a stroke width of 1 is used.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }
}

impl<'a> Drop for DrawLine<'a> {
    fn drop(&mut self) {
        match Line::new(
            Point::new(self.start_x, self.start_y),
            Point::new(self.end_x, self.end_y),
        )
        .into_styled(PrimitiveStyle::with_stroke(self.color, self.stroke_width))
        .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`arrow`]; draws the arrow when dropped and allows customization.
pub struct DrawArrow<'a> {
    image: &'a mut Image,
    start: Vector2<f64>,
    end: Vector2<f64>,
    color: Color,
    stroke_width: u32,
    head_length: f64,
}

impl<'a> DrawArrow<'a> {
    /// Sets the arrow's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the stroke width of the arrow's shaft.
    ///
    /// By default, a stroke width of 1 is used.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }

    /// Sets the length of the arrow head, in pixels.
    pub fn head_length(&mut self, length: f64) -> &mut Self {
        self.head_length = length;
        self
    }
}

impl<'a> Drop for DrawArrow<'a> {
    fn drop(&mut self) {
        let shaft = self.end - self.start;
        let len = shaft.norm();
        if len < f64::EPSILON {
            return;
        }

        // Never let the head extend past the start of the arrow.
        let head_len = self.head_length.min(len);
        let dir = shaft / len;
        let normal = Vector2::new(-dir.y, dir.x);
        let base = self.end - dir * head_len;
        let left = base + normal * (head_len * 0.4);
        let right = base - normal * (head_len * 0.4);

        let pt = |v: Vector2<f64>| Point::new(v.x.round() as i32, v.y.round() as i32);
        let mut target = Target(&mut *self.image);
        let shaft = Line::new(pt(self.start), pt(base))
            .into_styled(PrimitiveStyle::with_stroke(self.color, self.stroke_width))
            .draw(&mut target);
        let head = Triangle::new(pt(self.end), pt(left), pt(right))
            .into_styled(PrimitiveStyle::with_fill(self.color))
            .draw(&mut target);
        match shaft.and(head) {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`text`]; draws the text when dropped and allows customization.
pub struct DrawText<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    text: &'a str,
    color: Color,
    alignment: Alignment,
    baseline: Baseline,
}

impl<'a> DrawText<'a> {
    /// Sets the text color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Aligns the top of the text with the `y` coordinate.
    pub fn align_top(&mut self) -> &mut Self {
        self.baseline = Baseline::Top;
        self
    }

    /// Aligns the bottom of the text with the `y` coordinate.
    pub fn align_bottom(&mut self) -> &mut Self {
        self.baseline = Baseline::Bottom;
        self
    }

    /// Aligns the left side of the text with the `x` coordinate.
    pub fn align_left(&mut self) -> &mut Self {
        self.alignment = Alignment::Left;
        self
    }

    /// Aligns the right side of the text with the `x` coordinate.
    pub fn align_right(&mut self) -> &mut Self {
        self.alignment = Alignment::Right;
        self
    }
}

impl<'a> Drop for DrawText<'a> {
    fn drop(&mut self) {
        // FIXME: e-g's fonts lack some common glyphs, so subscripts and math can't be rendered
        let character_style = MonoTextStyle::new(&ascii::FONT_6X10, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(self.baseline)
            .build();
        match Text::with_text_style(
            self.text,
            Point::new(self.x, self.y),
            character_style,
            text_style,
        )
        .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`circle`] and [`dot`]; draws the circle when dropped and allows
/// customization.
pub struct DrawCircle<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    diameter: u32,
    stroke_width: u32,
    color: Color,
    filled: bool,
}

impl<'a> DrawCircle<'a> {
    /// Sets the circle's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the circle's stroke width.
    ///
    /// By default, a stroke width of 1 is used. Has no effect on filled circles.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }
}

impl<'a> Drop for DrawCircle<'a> {
    fn drop(&mut self) {
        let top_left = Point {
            x: self.x - (self.diameter / 2) as i32,
            y: self.y - (self.diameter / 2) as i32,
        };
        let circle = primitives::Circle {
            top_left,
            diameter: self.diameter,
        };
        let style = if self.filled {
            PrimitiveStyle::with_fill(self.color)
        } else {
            PrimitiveStyle::with_stroke(self.color, self.stroke_width)
        };
        match circle.into_styled(style).draw(&mut Target(&mut *self.image)) {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Draws a marker onto an image.
///
/// This can be used to highlight points of interest, like the solution of a linear system.
pub fn marker(image: &mut Image, x: i32, y: i32) -> DrawMarker<'_> {
    DrawMarker {
        image,
        x,
        y,
        color: Color::RED,
        size: 5,
    }
}

/// Draws a line onto an image.
pub fn line(
    image: &mut Image,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
) -> DrawLine<'_> {
    DrawLine {
        image,
        start_x,
        start_y,
        end_x,
        end_y,
        color: Color::BLUE,
        stroke_width: 1,
    }
}

/// Draws an arrow from `start` to `end`, with the head at `end`.
///
/// Coordinates are in (sub)pixels.
pub fn arrow(image: &mut Image, start: Vector2<f64>, end: Vector2<f64>) -> DrawArrow<'_> {
    DrawArrow {
        image,
        start,
        end,
        color: Color::BLACK,
        stroke_width: 1,
        head_length: 10.0,
    }
}

/// Draws a text string onto an image.
///
/// By default, the text is drawn centered horizontally and vertically around `x` and `y`.
pub fn text<'a>(image: &'a mut Image, x: i32, y: i32, text: &'a str) -> DrawText<'a> {
    DrawText {
        image,
        x,
        y,
        text,
        color: Color::BLACK,
        alignment: Alignment::Center,
        baseline: Baseline::Middle,
    }
}

/// Draws the outline of a circle onto an image.
pub fn circle(image: &mut Image, x: i32, y: i32, diameter: u32) -> DrawCircle<'_> {
    DrawCircle {
        image,
        x,
        y,
        diameter,
        stroke_width: 1,
        color: Color::GREEN,
        filled: false,
    }
}

/// Draws a filled disc onto an image.
///
/// This is what scatter plots are made of.
pub fn dot(image: &mut Image, x: i32, y: i32, diameter: u32) -> DrawCircle<'_> {
    DrawCircle {
        image,
        x,
        y,
        diameter,
        stroke_width: 1,
        color: Color::BLACK,
        filled: true,
    }
}

struct Target<'a>(&'a mut Image);

impl Dimensions for Target<'_> {
    fn bounding_box(&self) -> Rectangle {
        let (width, height) = (self.0.width(), self.0.height());

        Rectangle {
            top_left: Point { x: 0, y: 0 },
            size: Size { width, height },
        }
    }
}

impl DrawTarget for Target<'_> {
    type Color = Color;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for pixel in pixels {
            if pixel.0.x >= 0
                && (pixel.0.x as u32) < self.0.width()
                && pixel.0.y >= 0
                && (pixel.0.y as u32) < self.0.height()
            {
                self.0.set(pixel.0.x as _, pixel.0.y as _, pixel.1);
            }
        }

        Ok(())
    }
}
