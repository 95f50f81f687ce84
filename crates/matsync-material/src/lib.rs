//! Photometric material model and synchronizer.
//!
//! An operator can describe a surface two ways: by photometric parameters
//! (how much light it reflects, how much of that is specular, how much it
//! transmits) or by the color it appears to have. This crate keeps both
//! views consistent and turns them into the values a shader needs.
//!
//! # Modules
//!
//! - [`params`] - [`MaterialType`], [`MaterialParams`], parameter domains
//! - [`model`] - forward/inverse equations and coupling rules
//! - [`render`] - [`RenderTuple`] computation
//! - [`sync`] - [`Synchronizer`], the edit transaction
//! - [`config`] - [`MaterialDefaults`] and YAML loading
//!
//! # Quick Start
//!
//! ```rust
//! use matsync_material::prelude::*;
//!
//! let defaults = MaterialDefaults {
//!     color: Rgb::new(1.0, 0.0, 0.0),
//!     reflection_factor: 0.5,
//!     specular_coating: 0.3,
//!     ..MaterialDefaults::default()
//! };
//! let mut sync = Synchronizer::from_defaults(&defaults).unwrap();
//! let tuple = sync.apply_edit(Edit::Type(MaterialType::Painted)).unwrap();
//! assert_eq!(tuple.shininess, 80.0);
//! ```
//!
//! # Dependencies
//!
//! - [`matsync_core`] - colors and transfer functions
//! - [`matsync_color`] - luminance remapping
//! - `serde_yaml` - defaults files
//!
//! # Used By
//!
//! - `matsync-cli` - command line front end

#![warn(missing_docs)]

pub mod config;
pub mod edit;
mod error;
pub mod model;
pub mod params;
pub mod render;
pub mod sync;

pub use config::MaterialDefaults;
pub use edit::Edit;
pub use error::{MaterialError, MaterialResult};
pub use model::{DerivedState, TransmissionRatio};
pub use params::{MaterialParams, MaterialType, Parameter, MAX_REFLECTION_FACTOR};
pub use render::{RenderTuple, Rendered, Spectra};
pub use sync::{MaterialState, Synchronizer, COLOR_REFLECTANCE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        DerivedState, Edit, MaterialDefaults, MaterialError, MaterialParams, MaterialResult, MaterialType,
        Parameter, RenderTuple, Synchronizer, TransmissionRatio,
    };
    pub use matsync_core::{Rgb, Srgb};
}
