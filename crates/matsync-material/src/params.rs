//! Material types and their photometric parameters.
//!
//! Each [`MaterialType`] carries its own set of parameters, so
//! [`MaterialParams`] is a tagged union: a painted material simply has no
//! transmission field to get out of sync.
//!
//! # Domains
//!
//! | Parameter | Range | Types |
//! |-----------|-------|-------|
//! | reflection factor | [0, 0.9] | all |
//! | specular coating | [0, 1] | metallic, painted |
//! | transmission | [0, 1] | transparent |
//! | refractive index | [1, 2] | transparent |
//!
//! For transparent materials `reflection_factor + transmission <= 1` also
//! holds; edits keep it by clamping the other field.

use crate::error::{MaterialError, MaterialResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest reflection factor any material may have.
pub const MAX_REFLECTION_FACTOR: f64 = 0.9;

/// Material category, selects the photometric model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    /// Opaque, coating splits reflection into specular and diffuse.
    #[default]
    #[serde(alias = "Metallic", alias = "metal")]
    Metallic,
    /// Opaque, diffuse base under a clear specular coat.
    #[serde(alias = "Painted", alias = "paint")]
    Painted,
    /// Reflects and transmits, with refraction.
    #[serde(alias = "Transparent", alias = "glass")]
    Transparent,
}

impl MaterialType {
    /// All material types.
    pub const ALL: [MaterialType; 3] = [Self::Metallic, Self::Painted, Self::Transparent];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Metallic => "metallic",
            Self::Painted => "painted",
            Self::Transparent => "transparent",
        }
    }

    /// Phong exponent used for this type.
    pub fn shininess(self) -> f64 {
        match self {
            Self::Metallic | Self::Transparent => 40.0,
            Self::Painted => 80.0,
        }
    }

    /// Whether the material transmits no light.
    #[inline]
    pub fn is_opaque(self) -> bool {
        !matches!(self, Self::Transparent)
    }

    /// Whether `parameter` exists for this type.
    pub fn accepts(self, parameter: Parameter) -> bool {
        match parameter {
            Parameter::Color | Parameter::ReflectionFactor => true,
            Parameter::SpecularCoating => self.is_opaque(),
            Parameter::Transmission | Parameter::RefractiveIndex => !self.is_opaque(),
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for MaterialType {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metallic" | "metal" => Ok(Self::Metallic),
            "painted" | "paint" => Ok(Self::Painted),
            "transparent" | "glass" => Ok(Self::Transparent),
            _ => Err(MaterialError::UnknownMaterialType(s.to_string())),
        }
    }
}

/// An editable quantity of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Appearance color, per channel.
    Color,
    /// Fraction of light reflected.
    ReflectionFactor,
    /// Share of the reflection that is specular.
    SpecularCoating,
    /// Fraction of light transmitted.
    Transmission,
    /// Index of refraction.
    RefractiveIndex,
}

impl Parameter {
    /// Closed interval of valid values.
    pub fn domain(self) -> (f64, f64) {
        match self {
            Self::ReflectionFactor => (0.0, MAX_REFLECTION_FACTOR),
            Self::Color | Self::SpecularCoating | Self::Transmission => (0.0, 1.0),
            Self::RefractiveIndex => (1.0, 2.0),
        }
    }

    /// Returns `value` if it lies in [`Parameter::domain`].
    ///
    /// # Errors
    ///
    /// [`MaterialError::InvalidParameter`] otherwise (NaN included).
    pub fn check(self, value: f64) -> MaterialResult<f64> {
        let (min, max) = self.domain();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(MaterialError::invalid(self, value))
        }
    }

    /// Name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::ReflectionFactor => "reflection factor",
            Self::SpecularCoating => "specular coating",
            Self::Transmission => "transmission",
            Self::RefractiveIndex => "refractive index",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Photometric parameters, one variant per [`MaterialType`].
///
/// Constructed through the checked `new_*` functions; the synchronizer
/// is the only other writer and keeps every variant inside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialParams {
    /// See [`MaterialType::Metallic`].
    Metallic {
        /// Fraction of light reflected.
        reflection_factor: f64,
        /// Specular share of the reflection.
        specular_coating: f64,
    },
    /// See [`MaterialType::Painted`].
    Painted {
        /// Fraction of light reflected.
        reflection_factor: f64,
        /// Clear-coat reflectance.
        specular_coating: f64,
    },
    /// See [`MaterialType::Transparent`].
    Transparent {
        /// Fraction of light reflected.
        reflection_factor: f64,
        /// Fraction of light transmitted.
        transmission: f64,
        /// Index of refraction.
        refractive_index: f64,
    },
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self::Metallic {
            reflection_factor: 0.0,
            specular_coating: 0.0,
        }
    }
}

impl MaterialParams {
    /// Checked metallic parameters.
    pub fn metallic(reflection_factor: f64, specular_coating: f64) -> MaterialResult<Self> {
        Self::Metallic {
            reflection_factor,
            specular_coating,
        }
        .validated()
    }

    /// Checked painted parameters.
    pub fn painted(reflection_factor: f64, specular_coating: f64) -> MaterialResult<Self> {
        Self::Painted {
            reflection_factor,
            specular_coating,
        }
        .validated()
    }

    /// Checked transparent parameters.
    pub fn transparent(reflection_factor: f64, transmission: f64, refractive_index: f64) -> MaterialResult<Self> {
        Self::Transparent {
            reflection_factor,
            transmission,
            refractive_index,
        }
        .validated()
    }

    /// Returns `self` if every field lies in its domain.
    ///
    /// # Errors
    ///
    /// [`MaterialError::InvalidParameter`] for the first field out of range.
    /// A transparent material whose reflection and transmission sum past 1
    /// reports the transmission with the remaining headroom as its maximum.
    pub fn validated(self) -> MaterialResult<Self> {
        Parameter::ReflectionFactor.check(self.reflection_factor())?;
        match self {
            Self::Metallic { specular_coating, .. } | Self::Painted { specular_coating, .. } => {
                Parameter::SpecularCoating.check(specular_coating)?;
            }
            Self::Transparent {
                reflection_factor,
                transmission,
                refractive_index,
            } => {
                Parameter::Transmission.check(transmission)?;
                Parameter::RefractiveIndex.check(refractive_index)?;
                if reflection_factor + transmission > 1.0 {
                    return Err(MaterialError::InvalidParameter {
                        parameter: Parameter::Transmission,
                        value: transmission,
                        min: 0.0,
                        max: 1.0 - reflection_factor,
                    });
                }
            }
        }
        Ok(self)
    }

    /// The variant's type tag.
    pub fn material_type(&self) -> MaterialType {
        match self {
            Self::Metallic { .. } => MaterialType::Metallic,
            Self::Painted { .. } => MaterialType::Painted,
            Self::Transparent { .. } => MaterialType::Transparent,
        }
    }

    /// Reflection factor (every type has one).
    pub fn reflection_factor(&self) -> f64 {
        match *self {
            Self::Metallic { reflection_factor, .. }
            | Self::Painted { reflection_factor, .. }
            | Self::Transparent { reflection_factor, .. } => reflection_factor,
        }
    }

    /// Specular coating, `None` for transparent materials.
    pub fn specular_coating(&self) -> Option<f64> {
        match *self {
            Self::Metallic { specular_coating, .. } | Self::Painted { specular_coating, .. } => Some(specular_coating),
            Self::Transparent { .. } => None,
        }
    }

    /// Transmission, `None` for opaque materials.
    pub fn transmission(&self) -> Option<f64> {
        match *self {
            Self::Transparent { transmission, .. } => Some(transmission),
            _ => None,
        }
    }

    /// Refractive index, `None` for opaque materials.
    pub fn refractive_index(&self) -> Option<f64> {
        match *self {
            Self::Transparent { refractive_index, .. } => Some(refractive_index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parse() {
        assert_eq!("Painted".parse::<MaterialType>().unwrap(), MaterialType::Painted);
        assert_eq!(" glass ".parse::<MaterialType>().unwrap(), MaterialType::Transparent);
        assert!(matches!(
            "wood".parse::<MaterialType>(),
            Err(MaterialError::UnknownMaterialType(name)) if name == "wood"
        ));
    }

    #[test]
    fn test_type_display_roundtrip() {
        for ty in MaterialType::ALL {
            assert_eq!(ty.to_string().parse::<MaterialType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_shininess() {
        assert_eq!(MaterialType::Metallic.shininess(), 40.0);
        assert_eq!(MaterialType::Painted.shininess(), 80.0);
        assert_eq!(MaterialType::Transparent.shininess(), 40.0);
    }

    #[test]
    fn test_applicability() {
        assert!(MaterialType::Painted.accepts(Parameter::SpecularCoating));
        assert!(!MaterialType::Painted.accepts(Parameter::Transmission));
        assert!(!MaterialType::Transparent.accepts(Parameter::SpecularCoating));
        assert!(MaterialType::Transparent.accepts(Parameter::RefractiveIndex));
        for ty in MaterialType::ALL {
            assert!(ty.accepts(Parameter::ReflectionFactor));
        }
    }

    #[test]
    fn test_domain_check() {
        assert_eq!(Parameter::ReflectionFactor.check(0.9).unwrap(), 0.9);
        assert!(Parameter::ReflectionFactor.check(0.91).is_err());
        assert!(Parameter::RefractiveIndex.check(0.5).is_err());
        assert!(Parameter::SpecularCoating.check(f64::NAN).is_err());
    }

    #[test]
    fn test_transparent_sum_rejected() {
        let err = MaterialParams::transparent(0.5, 0.6, 1.5).unwrap_err();
        match err {
            MaterialError::InvalidParameter { parameter, max, .. } => {
                assert_eq!(parameter, Parameter::Transmission);
                assert!((max - 0.5).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_accessors() {
        let p = MaterialParams::transparent(0.2, 0.6, 1.5).unwrap();
        assert_eq!(p.material_type(), MaterialType::Transparent);
        assert_eq!(p.transmission(), Some(0.6));
        assert_eq!(p.specular_coating(), None);

        let p = MaterialParams::painted(0.4, 0.1).unwrap();
        assert_eq!(p.specular_coating(), Some(0.1));
        assert_eq!(p.refractive_index(), None);
    }

    #[test]
    fn test_default_is_black_metal() {
        let p = MaterialParams::default();
        assert_eq!(p.material_type(), MaterialType::Metallic);
        assert_eq!(p.reflection_factor(), 0.0);
    }

    #[test]
    fn test_serde_tagged() {
        let p = MaterialParams::metallic(0.5, 0.3).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"type\":\"metallic\""));
        let back: MaterialParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
