//! Image manipulation.
//!
//! This module provides:
//!
//! - The [`Image`] type, an owned RGBA image.
//! - [`Color`], an 8-bit sRGB color with alpha channel.
//! - A variety of [`draw`] functions used to render plots.

pub mod draw;

#[cfg(test)]
mod tests;

use std::{fmt, ops::Index, path::Path};

use embedded_graphics::{pixelcolor::raw::RawU32, prelude::PixelColor};
use image::{ImageBuffer, Rgba, RgbaImage};

#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
enum ImageFormat {
    Png,
}

impl ImageFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("png") => Ok(Self::Png),
            _ => anyhow::bail!(
                "invalid image path '{}' (must have one of the supported extensions)",
                path.display()
            ),
        }
    }
}

/// An 8-bit sRGB image with alpha channel.
#[derive(Clone)]
pub struct Image {
    pub(crate) buf: RgbaImage,
}

impl Image {
    /// Loads an image from the filesystem.
    ///
    /// The path must have a supported file extension (`png`).
    pub fn load<A: AsRef<Path>>(path: A) -> anyhow::Result<Self> {
        Self::load_impl(path.as_ref())
    }

    fn load_impl(path: &Path) -> anyhow::Result<Self> {
        match ImageFormat::from_path(path)? {
            ImageFormat::Png => {
                let data = std::fs::read(path)?;
                let buf =
                    image::load_from_memory_with_format(&data, image::ImageFormat::Png)?.to_rgba8();
                Ok(Self { buf })
            }
        }
    }

    /// Creates an image from raw RGBA bytes.
    ///
    /// # Panics
    ///
    /// Panics if `buf` does not hold exactly `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, buf: &[u8]) -> Self {
        let expected_size = width as usize * height as usize * 4;
        assert_eq!(
            expected_size,
            buf.len(),
            "incorrect buffer size {} for {}x{} image (expected {} bytes)",
            buf.len(),
            width,
            height,
            expected_size,
        );

        Self {
            buf: ImageBuffer::from_vec(width, height, buf.to_vec())
                .expect("buffer size does not match image resolution"),
        }
    }

    /// Saves an image to the file system.
    ///
    /// The path must have a supported file extension (`png`).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        self.save_impl(path.as_ref())
    }

    fn save_impl(&self, path: &Path) -> anyhow::Result<()> {
        match ImageFormat::from_path(path)? {
            ImageFormat::Png => {
                log::trace!("saving {}x{} image to {}", self.width(), self.height(), path.display());
                Ok(self.buf.save_with_format(path, image::ImageFormat::Png)?)
            }
        }
    }

    /// Creates an empty image of a specified size.
    ///
    /// The image will start out black and fully transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buf: ImageBuffer::new(width, height),
        }
    }

    /// Returns the width of this image, in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// Returns the height of this image, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Gets the image color at the given pixel coordinates.
    ///
    /// # Panics
    ///
    /// This will panic if `(x, y)` is outside the bounds of this image.
    pub fn get(&self, x: u32, y: u32) -> Color {
        Color(self.buf[(x, y)].0)
    }

    /// Sets the image color at the given pixel coordinates.
    ///
    /// # Panics
    ///
    /// This will panic if `(x, y)` is outside the bounds of this image.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.buf[(x, y)] = Rgba(color.0);
    }

    /// Overwrites every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        for pix in self.buf.pixels_mut() {
            *pix = Rgba(color.0);
        }
    }

    /// Returns the raw RGBA bytes of this image, row by row.
    pub fn data(&self) -> &[u8] {
        self.buf.as_raw()
    }

    pub(crate) fn into_rgba_image(self) -> RgbaImage {
        self.buf
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} Image", self.width(), self.height())
    }
}

/// An 8-bit RGBA color.
///
/// Colors are always in the sRGB color space and use non-premultiplied alpha.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Color(pub(crate) [u8; 4]);

impl Color {
    /// Fully transparent black (all components are 0).
    pub const NULL: Self = Self([0, 0, 0, 0]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const RED: Self = Self([255, 0, 0, 255]);
    pub const GREEN: Self = Self([0, 255, 0, 255]);
    pub const BLUE: Self = Self([0, 0, 255, 255]);
    pub const GRAY: Self = Self([128, 128, 128, 255]);
    pub const LIGHT_GRAY: Self = Self([220, 220, 220, 255]);

    // The qualitative palette the plots cycle through.
    pub const PALETTE_BLUE: Self = Self::from_rgb8(0x37, 0x7e, 0xb8);
    pub const PALETTE_ORANGE: Self = Self::from_rgb8(0xff, 0x7f, 0x00);
    pub const PALETTE_GREEN: Self = Self::from_rgb8(0x4d, 0xaf, 0x4a);
    pub const PALETTE_RED: Self = Self::from_rgb8(0xe4, 0x1a, 0x1c);
    pub const PALETTE_PURPLE: Self = Self::from_rgb8(0x98, 0x4e, 0xa3);
    pub const PALETTE_BROWN: Self = Self::from_rgb8(0xa6, 0x56, 0x28);

    /// Colors assigned to successive lines, planes and vectors of a plot.
    pub const CYCLE: [Self; 6] = [
        Self::PALETTE_BLUE,
        Self::PALETTE_ORANGE,
        Self::PALETTE_GREEN,
        Self::PALETTE_RED,
        Self::PALETTE_PURPLE,
        Self::PALETTE_BROWN,
    ];

    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Creates an opaque color from floating-point channels in `[0, 1]`.
    ///
    /// Channels outside of that range are clamped.
    pub fn from_rgb_f64(r: f64, g: f64, b: f64) -> Self {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_rgb8(q(r), q(g), q(b))
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.0[3]
    }

    pub fn with_alpha(mut self, a: u8) -> Color {
        self.0[3] = a;
        self
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r(),
            self.g(),
            self.b(),
            self.a(),
        )
    }
}

impl Index<usize> for Color {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

// FIXME leaks `embedded-graphics` dependency
impl PixelColor for Color {
    type Raw = RawU32;
}
