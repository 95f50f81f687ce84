//! Initial material values.
//!
//! Defaults can be loaded from YAML. Keys are snake_case; the short names
//! used by older scene files (`Refl`, `Kspec_refl`, `Trans`, `n`) are
//! accepted as aliases, and anything else, such as `shininess`, is ignored
//! because it is fixed per material type.
//!
//! ```yaml
//! color: [0.8, 0.1, 0.1]
//! type: painted
//! reflection_factor: 0.5
//! specular_coating: 0.2
//! ```

use crate::error::{MaterialError, MaterialResult};
use crate::params::{MaterialParams, MaterialType, Parameter};
use matsync_core::{Rgb, Srgb};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Starting point of a synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDefaults {
    /// Base appearance color.
    #[serde(alias = "Color")]
    pub color: Rgb<Srgb>,
    /// Material type.
    #[serde(rename = "type", alias = "Type")]
    pub material_type: MaterialType,
    /// Reflection factor.
    #[serde(alias = "Refl")]
    pub reflection_factor: f64,
    /// Specular coating, used by opaque types.
    #[serde(alias = "Kspec_refl")]
    pub specular_coating: f64,
    /// Transmission, used by transparent materials.
    #[serde(alias = "Trans")]
    pub transmission: f64,
    /// Refractive index, remembered for transparent materials.
    #[serde(alias = "n")]
    pub refractive_index: f64,
}

impl Default for MaterialDefaults {
    fn default() -> Self {
        Self {
            color: Rgb::black(),
            material_type: MaterialType::Metallic,
            reflection_factor: 0.0,
            specular_coating: 0.0,
            transmission: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl MaterialDefaults {
    /// Parses defaults from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> MaterialResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads defaults from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> MaterialResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Checked base color.
    pub fn checked_color(&self) -> MaterialResult<Rgb<Srgb>> {
        Rgb::try_unit(self.color.to_array()).map_err(|e| MaterialError::invalid(Parameter::Color, e.value()))
    }

    /// Checked refractive index.
    pub fn checked_refractive_index(&self) -> MaterialResult<f64> {
        Parameter::RefractiveIndex.check(self.refractive_index)
    }

    /// Checked parameters of [`MaterialDefaults::material_type`].
    ///
    /// Fields the type does not carry are not checked.
    pub fn params(&self) -> MaterialResult<MaterialParams> {
        match self.material_type {
            MaterialType::Metallic => MaterialParams::metallic(self.reflection_factor, self.specular_coating),
            MaterialType::Painted => MaterialParams::painted(self.reflection_factor, self.specular_coating),
            MaterialType::Transparent => {
                MaterialParams::transparent(self.reflection_factor, self.transmission, self.refractive_index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let d = MaterialDefaults::from_yaml_str("{}").unwrap();
        assert_eq!(d, MaterialDefaults::default());
        assert_eq!(d.params().unwrap(), MaterialParams::default());
    }

    #[test]
    fn test_legacy_keys() {
        let d = MaterialDefaults::from_yaml_str(
            "Color: [0.0, 1.0, 0.0]\nType: transparent\nRefl: 0.2\nTrans: 0.6\nn: 1.5\nShin: 40\n",
        )
        .unwrap();
        assert_eq!(d.material_type, MaterialType::Transparent);
        assert_eq!(d.params().unwrap(), MaterialParams::transparent(0.2, 0.6, 1.5).unwrap());
    }

    #[test]
    fn test_shininess_ignored() {
        let d = MaterialDefaults::from_yaml_str("type: painted\nreflection_factor: 0.4\nshininess: 12\n").unwrap();
        assert_eq!(d.params().unwrap(), MaterialParams::painted(0.4, 0.0).unwrap());
    }

    #[test]
    fn test_validation() {
        let d = MaterialDefaults::from_yaml_str("reflection_factor: 0.95").unwrap();
        assert!(matches!(d.params(), Err(MaterialError::InvalidParameter { .. })));

        let d = MaterialDefaults::from_yaml_str("color: [0.5, 2.0, 0.0]").unwrap();
        assert!(d.checked_color().is_err());

        let d = MaterialDefaults::from_yaml_str("refractive_index: 0.5").unwrap();
        assert!(d.checked_refractive_index().is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            MaterialDefaults::from_yaml_str("type: [oops"),
            Err(MaterialError::Config(_))
        ));
        assert!(matches!(
            MaterialDefaults::from_yaml_str("type: wood"),
            Err(MaterialError::Config(_))
        ));
    }
}
