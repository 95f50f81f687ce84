//! Render tuple computation.
//!
//! The base color is remapped once to the material's total luminance
//! `Ysum`, then split in linear light by luminance share. Because linear
//! scaling scales luminance, each part ends up with exactly its share:
//!
//! | Type | `Ysum` | diffuse | specular | transmission |
//! |------|--------|---------|----------|--------------|
//! | metallic | `R` | `R(1-C)` | `RC` | - |
//! | painted | `R` | `R(1-C)` | `RC`, gray | - |
//! | transparent | `R + T` | - | `R` | `T` |
//!
//! A zero `Ysum` skips the remap and renders black.

use crate::params::MaterialParams;
use matsync_color::{remap_linear, ColorResult};
use matsync_core::{LinearSrgb, Rgb, Srgb};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Values handed to the shading pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderTuple {
    /// Diffuse color.
    pub diffuse: Rgb<Srgb>,
    /// Specular color.
    pub specular: Rgb<Srgb>,
    /// Ambient color.
    pub ambient: Rgb<Srgb>,
    /// Transmitted color, black for opaque materials.
    pub transmission: Rgb<Srgb>,
    /// Share of light transmitted.
    pub opacity: f64,
    /// Phong exponent.
    pub shininess: f64,
    /// Index of refraction, 1 for opaque materials.
    pub refraction_ratio: f64,
}

impl Default for RenderTuple {
    fn default() -> Self {
        Self {
            diffuse: Rgb::black(),
            specular: Rgb::black(),
            ambient: Rgb::black(),
            transmission: Rgb::black(),
            opacity: 0.0,
            shininess: 40.0,
            refraction_ratio: 1.0,
        }
    }
}

/// Linear-light parts the tuple is encoded from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spectra {
    /// Diffusely reflected light.
    pub diffuse: Rgb<LinearSrgb>,
    /// Specularly reflected light.
    pub specular: Rgb<LinearSrgb>,
    /// Transmitted light.
    pub transmission: Rgb<LinearSrgb>,
    /// Ambient term.
    pub ambient: Rgb<LinearSrgb>,
}

impl Spectra {
    /// Luminance of diffuse, specular and transmitted light together.
    pub fn total_luminance(&self) -> f64 {
        (self.diffuse + self.specular + self.transmission).luminance()
    }

    /// Whether no channel returns more light than it receives.
    pub fn is_energy_conserving(&self) -> bool {
        (self.diffuse + self.specular + self.transmission)
            .to_array()
            .iter()
            .all(|&v| v <= 1.0 + 1e-9)
    }

    fn encode(&self, opacity: f64, shininess: f64, refraction_ratio: f64) -> RenderTuple {
        RenderTuple {
            diffuse: self.diffuse.to_srgb().clamp01(),
            specular: self.specular.to_srgb().clamp01(),
            ambient: self.ambient.to_srgb().clamp01(),
            transmission: self.transmission.to_srgb().clamp01(),
            opacity,
            shininess,
            refraction_ratio,
        }
    }
}

/// Output of [`compute`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rendered {
    /// Encoded values.
    pub tuple: RenderTuple,
    /// Linear parts behind [`Rendered::tuple`].
    pub spectra: Spectra,
}

/// Computes the render tuple for `params` tinted by `color`.
///
/// # Errors
///
/// Only if the parameters sum past a luminance of 1, which validated
/// parameters never do.
pub fn compute(params: &MaterialParams, color: Rgb<Srgb>) -> ColorResult<Rendered> {
    let material_type = params.material_type();
    let shininess = material_type.shininess();
    let refraction_ratio = params.refractive_index().unwrap_or(1.0);

    let spectra = match *params {
        MaterialParams::Metallic {
            reflection_factor: r,
            specular_coating: c,
        } => {
            let m = tint(color, r)?;
            let specular = share(m, r * c, r);
            Spectra {
                diffuse: share(m, r * (1.0 - c), r),
                specular,
                transmission: Rgb::black(),
                ambient: specular,
            }
        }
        MaterialParams::Painted {
            reflection_factor: r,
            specular_coating: c,
        } => {
            let m = tint(color, r)?;
            let specular = Rgb::gray(r * c);
            Spectra {
                diffuse: share(m, r * (1.0 - c), r),
                specular,
                transmission: Rgb::black(),
                ambient: specular,
            }
        }
        MaterialParams::Transparent {
            reflection_factor: r,
            transmission: t,
            ..
        } => {
            // coupling keeps r + t <= 1 up to rounding
            let y_sum = (r + t).min(1.0);
            let m = tint(color, y_sum)?;
            Spectra {
                diffuse: Rgb::black(),
                specular: share(m, r, y_sum),
                transmission: share(m, t, y_sum),
                ambient: m,
            }
        }
    };

    let opacity = match *params {
        MaterialParams::Transparent {
            reflection_factor,
            transmission,
            ..
        } if reflection_factor + transmission > 0.0 => transmission / (reflection_factor + transmission),
        _ => 0.0,
    };

    let tuple = spectra.encode(opacity, shininess, refraction_ratio);
    trace!(%material_type, ?tuple, "render");
    Ok(Rendered { tuple, spectra })
}

/// The base color at luminance `y_sum`, black when there is none.
fn tint(color: Rgb<Srgb>, y_sum: f64) -> ColorResult<Rgb<LinearSrgb>> {
    if y_sum > 0.0 {
        remap_linear(color, y_sum)
    } else {
        Ok(Rgb::black())
    }
}

/// `part / y_sum` of the remapped color.
fn share(m: Rgb<LinearSrgb>, part: f64, y_sum: f64) -> Rgb<LinearSrgb> {
    if y_sum > 0.0 { m * (part / y_sum) } else { Rgb::black() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_metallic_split() {
        let params = MaterialParams::metallic(0.5, 0.3).unwrap();
        let out = compute(&params, Rgb::new(1.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(out.spectra.diffuse.luminance(), 0.35, epsilon = 1e-6);
        assert_abs_diff_eq!(out.spectra.specular.luminance(), 0.15, epsilon = 1e-6);
        assert_eq!(out.tuple.ambient, out.tuple.specular);
        assert_eq!(out.tuple.transmission, Rgb::black());
        assert_eq!(out.tuple.opacity, 0.0);
        assert_eq!(out.tuple.refraction_ratio, 1.0);
        assert_eq!(out.tuple.shininess, 40.0);
    }

    #[test]
    fn test_painted_specular_is_gray() {
        let params = MaterialParams::painted(0.6, 0.25).unwrap();
        let out = compute(&params, Rgb::new(0.2, 0.4, 0.9)).unwrap();
        assert!(out.tuple.specular.is_achromatic(1e-12));
        assert_abs_diff_eq!(out.spectra.specular.luminance(), 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(out.spectra.diffuse.luminance(), 0.45, epsilon = 1e-6);
        assert_eq!(out.tuple.shininess, 80.0);
    }

    #[test]
    fn test_transparent_split() {
        let params = MaterialParams::transparent(0.2, 0.6, 1.45).unwrap();
        let out = compute(&params, Rgb::new(0.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(out.tuple.opacity, 0.75, epsilon = 1e-12);
        assert_eq!(out.tuple.refraction_ratio, 1.45);
        assert_eq!(out.tuple.diffuse, Rgb::black());
        assert_abs_diff_eq!(out.spectra.specular.luminance(), 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(out.spectra.transmission.luminance(), 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(out.spectra.ambient.luminance(), 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_luminance_is_black() {
        for params in [
            MaterialParams::default(),
            MaterialParams::painted(0.0, 0.0).unwrap(),
            MaterialParams::transparent(0.0, 0.0, 1.0).unwrap(),
        ] {
            let out = compute(&params, Rgb::new(1.0, 0.5, 0.0)).unwrap();
            assert_eq!(out.tuple.diffuse, Rgb::black());
            assert_eq!(out.tuple.specular, Rgb::black());
            assert_eq!(out.tuple.transmission, Rgb::black());
            assert_eq!(out.tuple.opacity, 0.0);
        }
    }

    #[test]
    fn test_default_tuple_matches_default_params() {
        let out = compute(&MaterialParams::default(), Rgb::black()).unwrap();
        assert_eq!(out.tuple, RenderTuple::default());
    }

    #[test]
    fn test_energy_conservation() {
        let params = MaterialParams::transparent(0.3, 0.7, 1.5).unwrap();
        let out = compute(&params, Rgb::new(1.0, 1.0, 0.0)).unwrap();
        assert!(out.spectra.is_energy_conserving());
        assert_abs_diff_eq!(out.spectra.total_luminance(), 1.0, epsilon = 1e-6);

        let hot = Spectra {
            diffuse: Rgb::gray(0.8),
            specular: Rgb::gray(0.4),
            ..Spectra::default()
        };
        assert!(!hot.is_energy_conserving());
    }
}
