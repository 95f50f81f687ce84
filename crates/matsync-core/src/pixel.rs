//! Encoding-tagged RGB triples and relative luminance.
//!
//! # Types
//!
//! - [`Rgb`] - Three `f64` channels tagged with a [`ColorSpace`]
//! - [`Guarded`] - Result of [`guard`], remembers whether a substitution happened
//!
//! # Luminance
//!
//! Relative luminance is `Y = 0.2126*R + 0.7152*G + 0.0722*B` over *linear*
//! values, which is why [`Rgb::luminance`] only exists on `Rgb<LinearSrgb>`.
//!
//! ```
//! use matsync_core::prelude::*;
//!
//! let red: Rgb<Srgb> = Rgb::new(1.0, 0.0, 0.0);
//! let y = red.to_linear().luminance();
//! assert!((y - 0.2126).abs() < 1e-12);
//! ```

use crate::colorspace::{ColorSpace, LinearSrgb, Srgb};
use crate::error::{Error, Result};
use crate::transfer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul};

// ============================================================================
// Rec.709 Luminance Constants
// ============================================================================

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f64 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f64 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
///
/// The weights sum to exactly one, so they double as the per-channel gamut
/// caps in weighted-luminance space and as the luminance-neutral gray.
pub const REC709_LUMA: [f64; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Channels below this are treated as carrying no information.
pub const GUARD_EPSILON: f64 = 1e-6;

/// Relative luminance of a linear RGB triple.
///
/// # Example
/// ```
/// use matsync_core::luminance;
/// let y = luminance([0.5, 0.3, 0.2]);
/// // 0.5 * 0.2126 + 0.3 * 0.7152 + 0.2 * 0.0722 = 0.3353
/// assert!((y - 0.3353).abs() < 1e-4);
/// ```
#[inline]
pub fn luminance(rgb: [f64; 3]) -> f64 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}

/// Output of [`guard`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guarded {
    /// The guarded triple, every channel at least [`GUARD_EPSILON`].
    pub value: [f64; 3],
    /// All three channels were below epsilon and [`REC709_LUMA`] was substituted.
    pub degenerate: bool,
}

/// Lifts near-zero channels so later divisions are safe.
///
/// Any channel below [`GUARD_EPSILON`] becomes epsilon. If every channel is
/// below epsilon there is no chromatic information left and the neutral
/// weight vector [`REC709_LUMA`] is returned instead.
///
/// ```
/// use matsync_core::{guard, REC709_LUMA};
///
/// let g = guard([0.0, 0.0, 0.0]);
/// assert!(g.degenerate);
/// assert_eq!(g.value, REC709_LUMA);
///
/// let g = guard([0.5, 0.0, 0.2]);
/// assert!(!g.degenerate);
/// assert_eq!(g.value[1], 1e-6);
/// ```
#[inline]
pub fn guard(rgb: [f64; 3]) -> Guarded {
    // NaN compares false, so it is lifted along with the zeros
    let below = rgb.map(|v| !(v >= GUARD_EPSILON));
    if below.iter().all(|&b| b) {
        return Guarded {
            value: REC709_LUMA,
            degenerate: true,
        };
    }
    let mut value = rgb;
    for (v, low) in value.iter_mut().zip(below) {
        if low {
            *v = GUARD_EPSILON;
        }
    }
    Guarded {
        value,
        degenerate: false,
    }
}

/// RGB triple tagged with its encoding.
///
/// # Type Parameters
///
/// - `C: ColorSpace` - [`Srgb`] or [`LinearSrgb`]
///
/// # Example
///
/// ```
/// use matsync_core::prelude::*;
///
/// let c: Rgb<Srgb> = Rgb::new(1.0, 0.5, 0.25);
/// assert_eq!(c.to_array(), [1.0, 0.5, 0.25]);
/// ```
#[derive(Copy, Clone, Default, PartialEq)]
pub struct Rgb<C: ColorSpace> {
    /// Red channel value.
    pub r: f64,
    /// Green channel value.
    pub g: f64,
    /// Blue channel value.
    pub b: f64,
    _colorspace: PhantomData<C>,
}

impl<C: ColorSpace> Rgb<C> {
    /// Create a new RGB triple.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r,
            g,
            b,
            _colorspace: PhantomData,
        }
    }

    /// Create a grayscale triple with equal channels.
    #[inline]
    pub const fn gray(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// All channels zero.
    #[inline]
    pub const fn black() -> Self {
        Self::gray(0.0)
    }

    /// Get channel values as an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Create from an array, rejecting channels outside [0, 1] or non-finite.
    pub fn try_unit(arr: [f64; 3]) -> Result<Self> {
        for (channel, &value) in arr.iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::NonFinite { channel });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::ChannelOutOfRange { channel, value });
            }
        }
        Ok(Self::from_array(arr))
    }

    /// Apply a function to each channel.
    #[inline]
    pub fn map<F: Fn(f64) -> f64>(self, f: F) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Clamp every channel to [0, 1].
    #[inline]
    pub fn clamp01(self) -> Self {
        self.map(|v| v.clamp(0.0, 1.0))
    }

    /// Whether every channel lies in [0, 1].
    #[inline]
    pub fn is_unit(self) -> bool {
        self.to_array().iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Whether all channels are equal (within `eps`).
    #[inline]
    pub fn is_achromatic(self, eps: f64) -> bool {
        (self.r - self.g).abs() <= eps && (self.g - self.b).abs() <= eps
    }

    /// Largest absolute channel difference to `other`.
    #[inline]
    pub fn max_abs_diff(self, other: Self) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl Rgb<Srgb> {
    /// Decode to linear light with the sRGB EOTF.
    #[inline]
    pub fn to_linear(self) -> Rgb<LinearSrgb> {
        Rgb::from_array(transfer::to_linear_rgb(self.to_array()))
    }
}

impl Rgb<LinearSrgb> {
    /// Encode to sRGB with the sRGB OETF.
    #[inline]
    pub fn to_srgb(self) -> Rgb<Srgb> {
        Rgb::from_array(transfer::from_linear_rgb(self.to_array()))
    }

    /// Relative luminance (Rec.709 weights).
    #[inline]
    pub fn luminance(self) -> f64 {
        luminance(self.to_array())
    }
}

impl<C: ColorSpace> fmt::Debug for Rgb<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("Rgb<{}>", C::NAME))
            .field("r", &self.r)
            .field("g", &self.g)
            .field("b", &self.b)
            .finish()
    }
}

impl<C: ColorSpace> fmt::Display for Rgb<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.p$}, {:.p$}, {:.p$})", self.r, self.g, self.b, p = p),
            None => write!(f, "({}, {}, {})", self.r, self.g, self.b),
        }
    }
}

impl<C: ColorSpace> From<[f64; 3]> for Rgb<C> {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl<C: ColorSpace> From<Rgb<C>> for [f64; 3] {
    #[inline]
    fn from(rgb: Rgb<C>) -> Self {
        rgb.to_array()
    }
}

// Serialized as a bare `[r, g, b]` array; the encoding lives in the type.
impl<C: ColorSpace> Serialize for Rgb<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de, C: ColorSpace> Deserialize<'de> for Rgb<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        <[f64; 3]>::deserialize(deserializer).map(Self::from_array)
    }
}

// ============================================================================
// Arithmetic Operations
// ============================================================================

impl<C: ColorSpace> Add for Rgb<C> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

// Scaling is only meaningful in linear light.
impl Mul<f64> for Rgb<LinearSrgb> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weights_sum_to_one() {
        assert_abs_diff_eq!(REC709_LUMA.iter().sum::<f64>(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_white_luminance() {
        let white: Rgb<LinearSrgb> = Rgb::gray(1.0);
        assert_abs_diff_eq!(white.luminance(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_guard_lifts_small_channels() {
        let g = guard([0.3, 1e-9, 0.0]);
        assert!(!g.degenerate);
        assert_eq!(g.value, [0.3, GUARD_EPSILON, GUARD_EPSILON]);
    }

    #[test]
    fn test_guard_degenerate_substitutes_weights() {
        let g = guard([1e-8, 0.0, 5e-7]);
        assert!(g.degenerate);
        assert_eq!(g.value, REC709_LUMA);
    }

    #[test]
    fn test_guard_nan_is_lifted() {
        let g = guard([f64::NAN, 0.5, 0.5]);
        assert_eq!(g.value[0], GUARD_EPSILON);
    }

    #[test]
    fn test_try_unit() {
        assert!(Rgb::<Srgb>::try_unit([0.0, 0.5, 1.0]).is_ok());
        assert_eq!(
            Rgb::<Srgb>::try_unit([0.0, -0.1, 1.0]),
            Err(Error::ChannelOutOfRange { channel: 1, value: -0.1 })
        );
        assert_eq!(
            Rgb::<Srgb>::try_unit([0.0, 0.1, f64::INFINITY]),
            Err(Error::NonFinite { channel: 2 })
        );
    }

    #[test]
    fn test_linear_roundtrip() {
        let c: Rgb<Srgb> = Rgb::new(0.8, 0.4, 0.1);
        let back = c.to_linear().to_srgb();
        assert!(c.max_abs_diff(back) < 1e-12);
    }

    #[test]
    fn test_linear_scaling() {
        let c: Rgb<LinearSrgb> = Rgb::new(0.5, 0.25, 1.0);
        let half = c * 0.5;
        assert_abs_diff_eq!(half.luminance(), c.luminance() * 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_debug_names_encoding() {
        let c: Rgb<LinearSrgb> = Rgb::black();
        assert!(format!("{:?}", c).starts_with("Rgb<Linear sRGB>"));
    }

    #[test]
    fn test_display_precision() {
        let c: Rgb<Srgb> = Rgb::new(1.0, 0.5, 0.25);
        assert_eq!(format!("{:.2}", c), "(1.00, 0.50, 0.25)");
    }

    #[test]
    fn test_serde_as_array() {
        let c: Rgb<Srgb> = Rgb::new(1.0, 0.5, 0.0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "[1.0,0.5,0.0]");
        let back: Rgb<Srgb> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
