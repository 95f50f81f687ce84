//! # matsync-core
//!
//! Core color types for the photometric material synchronizer.
//!
//! This crate provides the foundational pieces every other `matsync` crate
//! builds on:
//!
//! - [`ColorSpace`] - Marker trait for compile-time encoding safety
//! - [`Srgb`], [`LinearSrgb`] - The only two encodings the system knows about
//! - [`Rgb`] - Three-channel color tagged with its encoding
//! - [`transfer`] - sRGB EOTF/OETF
//! - [`REC709_LUMA`], [`luminance`], [`guard`] - Relative luminance helpers
//!
//! ## Design Philosophy
//!
//! An sRGB-encoded color cannot be mixed with a linear one without an explicit
//! conversion:
//!
//! ```
//! use matsync_core::prelude::*;
//!
//! let display: Rgb<Srgb> = Rgb::new(1.0, 0.5, 0.0);
//! let linear: Rgb<LinearSrgb> = display.to_linear();
//! assert!(linear.g < display.g);
//! // let bad = display + linear; // Compile error!
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! matsync-core (this crate)
//!    ^
//!    |
//!    +-- matsync-color (luminance remapping)
//!    +-- matsync-material (material model, synchronizer)
//!    +-- matsync-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;
pub mod pixel;
pub mod transfer;

pub use colorspace::*;
pub use error::*;
pub use pixel::{
    guard, luminance, Guarded, Rgb, GUARD_EPSILON, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G,
    REC709_LUMA_R,
};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use matsync_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colorspace::{ColorSpace, LinearSrgb, Srgb};
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{guard, luminance, Guarded, Rgb, REC709_LUMA};
    pub use crate::transfer;
}
