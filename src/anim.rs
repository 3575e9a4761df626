//! Animated images.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter},
    path::{Path, PathBuf},
    slice,
    time::Duration,
};

use anyhow::bail;
use image::{
    codecs::{
        gif::{GifDecoder, GifEncoder, Repeat},
        png::PngDecoder,
    },
    AnimationDecoder, Delay, Frame,
};

use crate::image::Image;

/// How long each frame is shown unless configured otherwise.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// NeuQuant sampling factor for GIF palette quantization (1 is best and slowest, 30 fastest).
const GIF_QUANTIZER_SPEED: i32 = 10;

#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum AnimationFormat {
    Gif,
    Apng,
}

/// A timed sequence of images.
pub struct Animation {
    frames: Vec<(Image, Duration)>,
}

impl Animation {
    /// Loads an animation from the filesystem.
    ///
    /// The path must have a supported extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_path_impl(path.as_ref())
    }

    fn from_path_impl(path: &Path) -> anyhow::Result<Self> {
        let format = format_from_path(path)?;
        Self::from_reader(BufReader::new(File::open(path)?), format)
    }

    /// Loads a animation from an in-memory byte slice.
    pub fn from_data(data: &[u8], format: AnimationFormat) -> anyhow::Result<Self> {
        Self::from_reader(data, format)
    }

    /// Loads a animation from a [`BufRead`] implementor.
    pub fn from_reader<R: BufRead>(mut reader: R, format: AnimationFormat) -> anyhow::Result<Self> {
        Self::from_reader_impl(&mut reader, format)
    }

    fn from_reader_impl(reader: &mut dyn BufRead, format: AnimationFormat) -> anyhow::Result<Self> {
        let frames = match format {
            AnimationFormat::Gif => GifDecoder::new(reader)?.into_frames(),
            AnimationFormat::Apng => {
                let dec = PngDecoder::new(reader)?;
                if !dec.is_apng() {
                    bail!("attempted to load APNG animation from still image PNG");
                }
                dec.apng().into_frames()
            }
        };

        let frames = frames
            .map(|res| {
                let frame = res?;
                let dur = Duration::from(frame.delay());
                let image = Image::from_rgba8(
                    frame.buffer().width(),
                    frame.buffer().height(),
                    frame.buffer(),
                );
                Ok((image, dur))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self { frames })
    }

    /// Creates an animation from a sequence of frames.
    pub fn from_frames<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = (Image, Duration)>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Returns the number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns an iterator over the frames of this animation.
    ///
    /// Note that every frame is only yielded *once* (ie. the iterator does not loop, even if the
    /// animation does). Call [`Iterator::cycle`] to loop the animation.
    pub fn frames(&self) -> FrameIter<'_> {
        FrameIter {
            frames: self.frames.iter(),
        }
    }

    /// Writes every frame to `dir` as a separate PNG file.
    ///
    /// Files are named `{prefix}-{index}.png`, with 1-based indices zero-padded to the number of
    /// digits in the frame count, so that they sort in playback order. `dir` is created if it
    /// doesn't exist yet.
    ///
    /// Returns the paths of the written files, in order.
    pub fn save_frames<P: AsRef<Path>>(&self, dir: P, prefix: &str) -> anyhow::Result<Vec<PathBuf>> {
        self.save_frames_impl(dir.as_ref(), prefix)
    }

    fn save_frames_impl(&self, dir: &Path, prefix: &str) -> anyhow::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let digits = self.frames.len().to_string().len();
        let mut paths = Vec::with_capacity(self.frames.len());
        for (i, (image, _)) in self.frames.iter().enumerate() {
            let path = dir.join(frame_file_name(prefix, i + 1, digits));
            image.save(&path)?;
            paths.push(path);
        }

        log::debug!("wrote {} frames to {}", paths.len(), dir.display());
        Ok(paths)
    }

    /// Encodes this animation as an endlessly looping GIF.
    pub fn save_gif<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        self.save_gif_impl(path.as_ref())
    }

    fn save_gif_impl(&self, path: &Path) -> anyhow::Result<()> {
        if self.frames.is_empty() {
            bail!("cannot encode an animation without frames");
        }
        if let AnimationFormat::Apng = format_from_path(path)? {
            bail!("only GIF encoding is supported (got '{}')", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = BufWriter::new(File::create(path)?);
        let mut encoder = GifEncoder::new_with_speed(file, GIF_QUANTIZER_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        for (image, duration) in &self.frames {
            let delay = Delay::from_saturating_duration(*duration);
            encoder.encode_frame(Frame::from_parts(
                image.clone().into_rgba_image(),
                0,
                0,
                delay,
            ))?;
        }

        log::debug!("wrote {}-frame animation to {}", self.frames.len(), path.display());
        Ok(())
    }
}

fn format_from_path(path: &Path) -> anyhow::Result<AnimationFormat> {
    match path.extension() {
        Some(ext) => {
            if ext == "gif" {
                Ok(AnimationFormat::Gif)
            } else if ext == "apng" || ext == "png" {
                Ok(AnimationFormat::Apng)
            } else {
                bail!(
                    "file extension `{}` is not supported for animations",
                    ext.to_string_lossy()
                )
            }
        }
        _ => bail!("animation path must have a supported extension"),
    }
}

fn frame_file_name(prefix: &str, index: usize, digits: usize) -> String {
    format!("{prefix}-{index:0digits$}.png")
}

/// An iterator over the [`AnimationFrame`]s that make up an [`Animation`].
#[derive(Clone)]
pub struct FrameIter<'a> {
    frames: slice::Iter<'a, (Image, Duration)>,
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = AnimationFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames
            .next()
            .map(|(image, duration)| AnimationFrame {
                image,
                duration: *duration,
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

impl<'a> ExactSizeIterator for FrameIter<'a> {}

/// A frame of an animation, consisting of image data and a duration.
pub struct AnimationFrame<'a> {
    image: &'a Image,
    duration: Duration,
}

impl<'a> AnimationFrame<'a> {
    /// Returns the image data for this frame.
    pub fn image(&self) -> &'a Image {
        self.image
    }

    /// Returns the [`Duration`] for which this frame should be displayed before proceeding to the
    /// next one.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_names_sort_in_order() {
        assert_eq!(frame_file_name("frame", 1, 2), "frame-01.png");
        assert_eq!(frame_file_name("frame", 31, 2), "frame-31.png");
        assert_eq!(frame_file_name("frame", 7, 1), "frame-7.png");
        assert_eq!(frame_file_name("shear", 5, 3), "shear-005.png");
    }

    #[test]
    fn formats() {
        assert!(matches!(
            format_from_path("a.gif".as_ref()),
            Ok(AnimationFormat::Gif)
        ));
        assert!(matches!(
            format_from_path("a.png".as_ref()),
            Ok(AnimationFormat::Apng)
        ));
        assert!(format_from_path("a.mp4".as_ref()).is_err());
        assert!(format_from_path("noext".as_ref()).is_err());
    }

    #[test]
    fn frames_iter() {
        let anim = Animation::from_frames(
            (0..3).map(|i| (Image::new(i + 1, 1), Duration::from_millis(50 * (i as u64 + 1)))),
        );
        assert_eq!(anim.len(), 3);
        assert_eq!(anim.frames().len(), 3);
        let widths = anim.frames().map(|f| f.image().width()).collect::<Vec<_>>();
        assert_eq!(widths, [1, 2, 3]);
        assert_eq!(anim.frames().last().unwrap().duration(), Duration::from_millis(150));
    }

    #[test]
    fn empty_gif_is_rejected() {
        let anim = Animation::from_frames(std::iter::empty());
        assert!(anim.is_empty());
        let err = anim.save_gif("never-written.gif").unwrap_err();
        assert!(err.to_string().contains("without frames"), "{err}");
    }
}
