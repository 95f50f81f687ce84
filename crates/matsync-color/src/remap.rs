//! Luminance remapping with per-channel gamut caps.
//!
//! Rescales the chromaticity of an sRGB color so its linear relative luminance
//! hits an exact target, without pushing any linear channel past 1.
//!
//! # Algorithm
//!
//! Work happens in weighted-luminance space, `W_i = K_i * linear_i`, where the
//! luminance is simply `sum(W)` and each channel is capped at `K_i`:
//!
//! ```text
//! 1. W = guard(K * linear(color))
//! 2. W = W / sum(W) * Y
//! 3. idx1 = argmin(K - W); if W[idx1] <= K[idx1]: done
//! 4. idx2 = argmin(K - W) over the others; clamp W[idx2] to K[idx2]
//!    pin W[idx1] = K[idx1]
//!    W += (K - W) / sum(K - W) * (Y - sum(W))
//! 5. color' = srgb(W / K)
//! ```
//!
//! Since `sum(K) == 1` and `Y <= 1`, the remaining headroom always covers the
//! shortfall, so step 4 lands every channel inside `[0, K_i]`.
//!
//! # Example
//!
//! ```rust
//! use matsync_color::remap;
//! use matsync_core::prelude::*;
//!
//! let red: Rgb<Srgb> = Rgb::new(1.0, 0.0, 0.0);
//! let out = remap(red, 0.5).unwrap();
//! assert!((out.to_linear().luminance() - 0.5).abs() < 1e-6);
//! assert!(out.is_unit());
//! ```

use crate::error::{check_luminance, ColorResult};
use glam::DVec3;
use matsync_core::{guard, LinearSrgb, Rgb, Srgb, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};
use tracing::{debug, trace};

/// Luminance weights as a vector; also the per-channel caps in `W` space.
const LUMA: DVec3 = DVec3::new(REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B);

/// Which channels hit their gamut cap during water-filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Saturation {
    /// The scaled color fit without clamping.
    #[default]
    None,
    /// One channel was pinned at its cap.
    Single(usize),
    /// The first channel was pinned and the second clamped.
    Double(usize, usize),
}

/// Intermediate values of a remap, for inspection and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemapReport {
    /// Weighted vector after guarding and scaling to the target (step 2).
    pub scaled: [f64; 3],
    /// Weighted vector after water-filling (step 4).
    pub filled: [f64; 3],
    /// Channels held at their cap.
    pub saturation: Saturation,
    /// Input carried no chroma and was replaced by the neutral gray.
    pub degenerate: bool,
    /// Remapped color in linear light, clamped to [0, 1].
    pub linear: Rgb<LinearSrgb>,
}

impl RemapReport {
    /// The remapped color, sRGB-encoded and clamped to [0, 1].
    #[inline]
    pub fn srgb(&self) -> Rgb<Srgb> {
        self.linear.to_srgb().clamp01()
    }
}

/// Remaps `color` to relative luminance `target_y`.
///
/// # Errors
///
/// [`crate::ColorError::InvalidLuminance`] if `target_y` is outside [0, 1].
pub fn remap(color: Rgb<Srgb>, target_y: f64) -> ColorResult<Rgb<Srgb>> {
    remap_with_report(color, target_y).map(|r| r.srgb())
}

/// Like [`remap`] but returns the linear-light result.
///
/// Scaling the result by `s` yields a color of luminance `s * target_y`,
/// which is how a single remap gets split into luminance shares.
pub fn remap_linear(color: Rgb<Srgb>, target_y: f64) -> ColorResult<Rgb<LinearSrgb>> {
    remap_with_report(color, target_y).map(|r| r.linear)
}

/// Remaps and returns every intermediate value.
pub fn remap_with_report(color: Rgb<Srgb>, target_y: f64) -> ColorResult<RemapReport> {
    check_luminance(target_y)?;
    trace!(?color, target_y, "remap");

    let weighted = LUMA * DVec3::from_array(color.to_linear().to_array());
    let guarded = guard(weighted.to_array());
    if guarded.degenerate {
        debug!(?color, "degenerate color, substituting neutral gray");
    }

    let w = DVec3::from_array(guarded.value);
    let scaled = w / w.element_sum() * target_y;

    let mut filled = scaled;
    let saturation = water_fill(&mut filled, target_y);

    let linear = (filled / LUMA).clamp(DVec3::ZERO, DVec3::ONE);
    trace!(?saturation, linear = ?linear, "remap done");

    Ok(RemapReport {
        scaled: scaled.to_array(),
        filled: filled.to_array(),
        saturation,
        degenerate: guarded.degenerate,
        linear: Rgb::from_array(linear.to_array()),
    })
}

/// Channel with the least headroom `K_i - W_i`, ties broken R, G, B.
fn least_headroom(w: DVec3, skip: Option<usize>) -> usize {
    let mut best = 0;
    let mut best_room = f64::INFINITY;
    for i in 0..3 {
        if skip == Some(i) {
            continue;
        }
        let room = LUMA[i] - w[i];
        if room < best_room {
            best = i;
            best_room = room;
        }
    }
    best
}

/// Steps 3-4: pins overflowing channels and spreads the shortfall over the
/// remaining headroom.
fn water_fill(w: &mut DVec3, target_y: f64) -> Saturation {
    let idx1 = least_headroom(*w, None);
    if w[idx1] <= LUMA[idx1] {
        return Saturation::None;
    }

    w[idx1] = 0.0;
    let idx2 = least_headroom(*w, Some(idx1));
    let second = w[idx2] > LUMA[idx2];
    if second {
        w[idx2] = LUMA[idx2];
    }
    w[idx1] = LUMA[idx1];

    let diff = target_y - w.element_sum();
    let mut room = (LUMA - *w).max(DVec3::ZERO);
    room[idx1] = 0.0;
    let total = room.element_sum();
    if total > 0.0 {
        *w += room * (diff / total);
    }

    if second {
        Saturation::Double(idx1, idx2)
    } else {
        Saturation::Single(idx1)
    }
}
