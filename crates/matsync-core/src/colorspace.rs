//! Color encodings and compile-time encoding safety.
//!
//! Encodings are zero-sized marker types implementing [`ColorSpace`]. A color
//! carries its encoding as a type parameter, so sRGB-encoded and linear values
//! never mix without going through [`crate::transfer`].
//!
//! # Supported Encodings
//!
//! - [`Srgb`] - Display-referred, sRGB transfer curve (what the operator picks)
//! - [`LinearSrgb`] - Same primaries, linear light (where luminance is computed)
//!
//! Both share Rec.709 primaries and the D65 white point; the Rec.709 luminance
//! weights are only meaningful for these primaries.

use std::fmt;

/// Trait for color encoding marker types.
///
/// # Implementing
///
/// ```
/// use matsync_core::ColorSpace;
///
/// #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// pub struct Scratch;
///
/// impl ColorSpace for Scratch {
///     const NAME: &'static str = "Scratch";
///     const IS_LINEAR: bool = true;
/// }
/// ```
pub trait ColorSpace: Copy + Clone + Default + Send + Sync + fmt::Debug + 'static {
    /// Human-readable name, used in `Debug` output and logs.
    const NAME: &'static str;

    /// Whether values are proportional to light (no transfer curve applied).
    const IS_LINEAR: bool;
}

/// sRGB - gamma-encoded display values.
///
/// # Characteristics
/// - **Primaries**: Rec.709
/// - **White Point**: D65
/// - **Transfer**: IEC 61966-2-1 piecewise curve
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Srgb;

impl ColorSpace for Srgb {
    const NAME: &'static str = "sRGB";
    const IS_LINEAR: bool = false;
}

/// Linear sRGB - sRGB primaries with linear transfer.
///
/// Relative luminance is a weighted sum in this encoding only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LinearSrgb;

impl ColorSpace for LinearSrgb {
    const NAME: &'static str = "Linear sRGB";
    const IS_LINEAR: bool = true;
}
