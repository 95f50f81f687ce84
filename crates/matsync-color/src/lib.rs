//! # matsync-color
//!
//! Gamut-safe luminance remapping for sRGB colors.
//!
//! Given an sRGB color and a target relative luminance, [`remap`] keeps the
//! hue of the color while hitting the target exactly. When the plain scaled
//! color would push a linear channel past 1, the excess is redistributed over
//! the channels that still have headroom ("two-stage water-filling").
//!
//! # Quick Start
//!
//! ```rust
//! use matsync_color::{remap, remap_with_report, Saturation};
//! use matsync_core::prelude::*;
//!
//! let orange: Rgb<Srgb> = Rgb::new(1.0, 0.5, 0.0);
//!
//! let dim = remap(orange, 0.05).unwrap();
//! assert!((dim.to_linear().luminance() - 0.05).abs() < 1e-6);
//!
//! let report = remap_with_report(orange, 0.9).unwrap();
//! assert_ne!(report.saturation, Saturation::None);
//! ```
//!
//! # Dependencies
//!
//! - `matsync-core` - `Rgb`, sRGB transfer, luminance weights, `guard`
//! - [`glam`] - `DVec3` arithmetic in weighted-luminance space
//!
//! # Used By
//!
//! - `matsync-material` - render tuple computation
//! - `matsync-cli` - `remap` command

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod remap;

pub use error::{ColorError, ColorResult};
pub use remap::{remap, remap_linear, remap_with_report, RemapReport, Saturation};
