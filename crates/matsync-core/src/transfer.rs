//! sRGB transfer function.
//!
//! The sRGB standard uses a piecewise function combining a linear segment
//! near black with a power curve (approximately gamma 2.2) for the rest.
//!
//! # Range
//!
//! - Input/Output: [0, 1]
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

/// sRGB EOTF: Decodes sRGB encoded values to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use matsync_core::transfer::to_linear;
///
/// let linear = to_linear(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: Encodes linear light to sRGB.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
///
/// # Example
///
/// ```rust
/// use matsync_core::transfer::from_linear;
///
/// let encoded = from_linear(0.214);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn from_linear(l: f64) -> f64 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Applies the sRGB EOTF to an RGB triplet.
#[inline]
pub fn to_linear_rgb(rgb: [f64; 3]) -> [f64; 3] {
    [to_linear(rgb[0]), to_linear(rgb[1]), to_linear(rgb[2])]
}

/// Applies the sRGB OETF to an RGB triplet.
#[inline]
pub fn from_linear_rgb(rgb: [f64; 3]) -> [f64; 3] {
    [from_linear(rgb[0]), from_linear(rgb[1]), from_linear(rgb[2])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_roundtrip() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            let back = from_linear(to_linear(v));
            assert_abs_diff_eq!(v, back, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(to_linear(0.0), 0.0);
        assert_abs_diff_eq!(to_linear(1.0), 1.0, epsilon = 1e-12);
        assert_eq!(from_linear(0.0), 0.0);
        assert_abs_diff_eq!(from_linear(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segments_meet() {
        // Both branches agree at the breakpoints.
        assert_abs_diff_eq!(0.04045 / 12.92, ((0.04045 + 0.055) / 1.055f64).powf(2.4), epsilon = 1e-6);
        assert_abs_diff_eq!(0.0031308 * 12.92, 1.055 * 0.0031308f64.powf(1.0 / 2.4) - 0.055, epsilon = 1e-5);
    }

    #[test]
    fn test_midpoint() {
        assert_abs_diff_eq!(to_linear(0.5), 0.214, epsilon = 0.001);
    }
}
