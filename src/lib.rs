//! Visualizations of 2D and 3D linear algebra.
//!
//! The centerpiece is [`transform::generate`], which turns a 2x2 matrix and a set of points into a
//! sequence of point sets that morphs smoothly from the identity transform to the matrix. The
//! [`render`] module turns such a sequence into an [`anim::Animation`], which can be written out as
//! numbered PNG frames or as a GIF.
//!
//! [`system`] and [`picture`] deal with small systems of linear equations: solving them, and
//! drawing their row and column pictures.
//!
//! # Coordinates
//!
//! Data space uses the usual mathematical orientation: X points to the right, Y points up. Image
//! space has Y pointing *down*, with the origin in the top left corner. [`plot::Axes`] maps between
//! the two.
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the log levels set by [`init_logger!`], using the syntax of
//!   [`env_logger`].

use log::LevelFilter;

pub mod anim;
pub mod error;
pub mod grid;
pub mod image;
pub mod picture;
pub mod plot;
pub mod preset;
pub mod render;
pub mod system;
pub mod transform;

#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and linviz will log at *debug* level, everything else is off unless enabled
/// via `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
