//! Forward and inverse photometric equations per material type.
//!
//! The forward mapping condenses a material's parameters into its
//! [`DerivedState`]: the total reflected/transmitted luminance `Y` plus one
//! shape coefficient that says how that luminance is split. The inverse
//! mapping rebuilds parameters of any type from a derived state, which is
//! how a color edit or a type switch turns into parameter values.
//!
//! | Type | `Y` | shape | inverse |
//! |------|-----|-------|---------|
//! | metallic | `R` | `C` | `R = min(0.9, Y)`, `C = shape` |
//! | painted | `R(1-C)/(1-CR)` | `CR` | `R = min(0.9, s + (1-s)Y)`, `C = min(1, s/R)` |
//! | transparent | `R + T` | `K_T = T/R` | `R = min(0.9, Y/(1+K_T))`, `T = Y - R` |
//!
//! Each forward mapping only touches its own coefficient and carries the
//! other over, so switching metallic -> transparent -> metallic restores
//! the coating as long as no clamp engaged and nothing was transmitted on
//! the way. A transmitting material resets the shape to 1.
//!
//! Everything here is pure; [`crate::sync`] owns the state.

use crate::error::{MaterialError, MaterialResult};
use crate::params::{MaterialParams, MaterialType, Parameter, MAX_REFLECTION_FACTOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transmission-to-reflection ratio of a transparent material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransmissionRatio {
    /// `T / R` with `R > 0`.
    Finite(f64),
    /// `R == 0`: everything not absorbed is transmitted.
    Unbounded,
}

impl TransmissionRatio {
    /// Ratio for the given reflection factor and transmission.
    pub fn of(reflection_factor: f64, transmission: f64) -> Self {
        if reflection_factor > 0.0 {
            Self::Finite(transmission / reflection_factor)
        } else {
            Self::Unbounded
        }
    }

    /// Splits luminance `y` into `(reflection_factor, transmission)`.
    pub fn split(self, y: f64) -> (f64, f64) {
        let reflection = match self {
            Self::Finite(k) => (y / (1.0 + k)).clamp(0.0, MAX_REFLECTION_FACTOR),
            Self::Unbounded => 0.0,
        };
        (reflection, (y - reflection).clamp(0.0, 1.0))
    }
}

impl Default for TransmissionRatio {
    fn default() -> Self {
        Self::Finite(0.0)
    }
}

impl fmt::Display for TransmissionRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(k) => write!(f, "{k}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Coefficients derived from the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
    /// Total target luminance `Y`.
    pub luminance: f64,
    /// Opaque split coefficient; `None` means "recompute from the parameters".
    pub shape: Option<f64>,
    /// Transparent split coefficient.
    pub transmission_ratio: TransmissionRatio,
}

impl Default for DerivedState {
    fn default() -> Self {
        Self {
            luminance: 0.0,
            shape: Some(0.0),
            transmission_ratio: TransmissionRatio::default(),
        }
    }
}

/// Total luminance `Y` of a parameter set.
pub fn luminance(params: &MaterialParams) -> f64 {
    match *params {
        MaterialParams::Metallic { reflection_factor, .. } => reflection_factor,
        MaterialParams::Painted {
            reflection_factor: r,
            specular_coating: c,
        } => {
            let denom = 1.0 - c * r;
            if denom > 0.0 { r * (1.0 - c) / denom } else { 0.0 }
        }
        MaterialParams::Transparent {
            reflection_factor,
            transmission,
            ..
        } => reflection_factor + transmission,
    }
}

/// Opaque shape coefficient, `None` for transparent materials.
pub fn shape(params: &MaterialParams) -> Option<f64> {
    match *params {
        MaterialParams::Metallic { specular_coating, .. } => Some(specular_coating),
        MaterialParams::Painted {
            reflection_factor,
            specular_coating,
        } => Some(specular_coating * reflection_factor),
        MaterialParams::Transparent { .. } => None,
    }
}

/// Forward mapping.
///
/// Coefficients the type does not define are carried over from `prev`,
/// except that a transparent material with `T > 0` sets the shape to 1.
pub fn forward(params: &MaterialParams, prev: &DerivedState) -> DerivedState {
    let luminance = luminance(params);
    match *params {
        MaterialParams::Transparent {
            reflection_factor,
            transmission,
            ..
        } => DerivedState {
            luminance,
            shape: if transmission > 0.0 { Some(1.0) } else { prev.shape },
            transmission_ratio: TransmissionRatio::of(reflection_factor, transmission),
        },
        _ => DerivedState {
            luminance,
            shape: shape(params),
            transmission_ratio: prev.transmission_ratio,
        },
    }
}

/// Inverse mapping: parameters of type `target` reproducing `derived`.
///
/// An unspecified shape is taken from `current`. Transparent results use
/// `refractive_index`, which the caller keeps across type switches.
pub fn inverse(
    target: MaterialType,
    derived: &DerivedState,
    current: &MaterialParams,
    refractive_index: f64,
) -> MaterialParams {
    let y = derived.luminance.clamp(0.0, 1.0);
    let shape = derived.shape.or_else(|| shape(current)).unwrap_or(0.0);

    match target {
        MaterialType::Metallic => {
            let reflection_factor = y.min(MAX_REFLECTION_FACTOR);
            MaterialParams::Metallic {
                reflection_factor,
                specular_coating: if reflection_factor > 0.0 { shape.clamp(0.0, 1.0) } else { 0.0 },
            }
        }
        MaterialType::Painted => {
            let reflection_factor = (shape + (1.0 - shape) * y).clamp(0.0, MAX_REFLECTION_FACTOR);
            let specular_coating = if reflection_factor > 0.0 {
                (shape / reflection_factor).clamp(0.0, 1.0)
            } else {
                0.0
            };
            MaterialParams::Painted {
                reflection_factor,
                specular_coating,
            }
        }
        MaterialType::Transparent => {
            let (reflection_factor, transmission) = derived.transmission_ratio.split(y);
            MaterialParams::Transparent {
                reflection_factor,
                transmission,
                refractive_index,
            }
        }
    }
}

/// Writes `value` to `parameter` and applies the coupling rules.
///
/// - transparent: raising `R` past `1 - T` lowers `T`, and vice versa
/// - opaque: `R == 0` forces the coating to 0
///
/// # Errors
///
/// [`MaterialError::InvalidParameter`] if `value` is outside the domain,
/// [`MaterialError::InapplicableParameter`] if the type lacks the parameter.
pub fn apply_parameter(params: &MaterialParams, parameter: Parameter, value: f64) -> MaterialResult<MaterialParams> {
    let value = parameter.check(value)?;
    let material_type = params.material_type();
    if parameter == Parameter::Color || !material_type.accepts(parameter) {
        return Err(MaterialError::InapplicableParameter {
            parameter,
            material_type,
        });
    }

    let mut out = *params;
    match (&mut out, parameter) {
        (
            MaterialParams::Metallic {
                reflection_factor,
                specular_coating,
            }
            | MaterialParams::Painted {
                reflection_factor,
                specular_coating,
            },
            Parameter::ReflectionFactor,
        ) => {
            *reflection_factor = value;
            if value == 0.0 {
                *specular_coating = 0.0;
            }
        }
        (
            MaterialParams::Metallic { specular_coating, .. } | MaterialParams::Painted { specular_coating, .. },
            Parameter::SpecularCoating,
        ) => *specular_coating = value,
        (
            MaterialParams::Transparent {
                reflection_factor,
                transmission,
                ..
            },
            Parameter::ReflectionFactor,
        ) => {
            *reflection_factor = value;
            *transmission = transmission.min(1.0 - value);
        }
        (
            MaterialParams::Transparent {
                reflection_factor,
                transmission,
                ..
            },
            Parameter::Transmission,
        ) => {
            *transmission = value;
            *reflection_factor = reflection_factor.min(1.0 - value);
        }
        (MaterialParams::Transparent { refractive_index, .. }, Parameter::RefractiveIndex) => {
            *refractive_index = value;
        }
        _ => {
            return Err(MaterialError::InapplicableParameter {
                parameter,
                material_type,
            });
        }
    }
    Ok(out)
}
