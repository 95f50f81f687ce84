//! Operator edits.

use crate::error::{MaterialError, MaterialResult};
use crate::params::{MaterialType, Parameter};
use matsync_core::{Rgb, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single change requested by the operator.
///
/// Edit scripts list edits as single-key maps, see [`parse_script`].
/// Serde's externally tagged JSON form is the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edit {
    /// New appearance color; parameters follow.
    Color(Rgb<Srgb>),
    /// Switch model, keeping the appearance as far as possible.
    Type(MaterialType),
    /// Set the reflection factor.
    ReflectionFactor(f64),
    /// Set the specular coating (opaque types).
    SpecularCoating(f64),
    /// Set the transmission (transparent).
    Transmission(f64),
    /// Set the refractive index (transparent).
    RefractiveIndex(f64),
    /// Set the refractive index, touching only the refraction ratio.
    RefractiveIndexOnly(f64),
}

impl Edit {
    /// The edited parameter.
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            Self::Color(_) => Some(Parameter::Color),
            Self::Type(_) => None,
            Self::ReflectionFactor(_) => Some(Parameter::ReflectionFactor),
            Self::SpecularCoating(_) => Some(Parameter::SpecularCoating),
            Self::Transmission(_) => Some(Parameter::Transmission),
            Self::RefractiveIndex(_) | Self::RefractiveIndexOnly(_) => Some(Parameter::RefractiveIndex),
        }
    }

    /// Checks the carried value against its domain.
    pub fn validate(&self) -> MaterialResult<()> {
        match *self {
            Self::Color(color) => {
                Rgb::<Srgb>::try_unit(color.to_array())
                    .map_err(|e| MaterialError::invalid(Parameter::Color, e.value()))?;
            }
            Self::Type(_) => {}
            Self::ReflectionFactor(v)
            | Self::SpecularCoating(v)
            | Self::Transmission(v)
            | Self::RefractiveIndex(v)
            | Self::RefractiveIndexOnly(v) => {
                if let Some(parameter) = self.parameter() {
                    parameter.check(v)?;
                }
            }
        }
        Ok(())
    }
}

/// Parses a YAML edit script.
///
/// ```rust
/// use matsync_material::edit::{parse_script, Edit};
/// use matsync_material::MaterialType;
///
/// let edits = parse_script("- type: painted\n- reflection_factor: 0.5\n").unwrap();
/// assert_eq!(edits, [Edit::Type(MaterialType::Painted), Edit::ReflectionFactor(0.5)]);
/// ```
pub fn parse_script(yaml: &str) -> MaterialResult<Vec<Edit>> {
    let edits: Vec<Edit> = serde_yaml::with::singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_str(yaml))?;
    Ok(edits)
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "color={c:.4}"),
            Self::Type(t) => write!(f, "type={t}"),
            Self::ReflectionFactor(v) => write!(f, "refl={v}"),
            Self::SpecularCoating(v) => write!(f, "coat={v}"),
            Self::Transmission(v) => write!(f, "trans={v}"),
            Self::RefractiveIndex(v) => write!(f, "n={v}"),
            Self::RefractiveIndexOnly(v) => write!(f, "n-only={v}"),
        }
    }
}
