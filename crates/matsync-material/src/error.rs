//! Error types for material edits.
//!
//! Every variant aborts the edit transaction that raised it; the
//! synchronizer keeps its previous state.

use crate::params::{MaterialType, Parameter};
use matsync_color::ColorError;
use thiserror::Error;

/// Material operation error.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// A value outside its parameter's domain.
    #[error("{parameter} {value} outside [{min}, {max}]")]
    InvalidParameter {
        /// Parameter being written.
        parameter: Parameter,
        /// Rejected value.
        value: f64,
        /// Lower bound of the domain.
        min: f64,
        /// Upper bound of the domain.
        max: f64,
    },

    /// The parameter does not exist for the current material type.
    #[error("{parameter} does not apply to {material_type} materials")]
    InapplicableParameter {
        /// Parameter being written.
        parameter: Parameter,
        /// Current material type.
        material_type: MaterialType,
    },

    /// Material type name not recognized.
    #[error("unknown material type '{0}': expected metallic, painted or transparent")]
    UnknownMaterialType(String),

    /// Luminance remapping failed.
    #[error(transparent)]
    Luminance(#[from] ColorError),

    /// An edit was started while another is still open.
    #[error("an edit transaction is already in flight")]
    EditInFlight,

    /// Defaults file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Defaults file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MaterialError {
    /// Creates an [`MaterialError::InvalidParameter`] using the parameter's domain.
    #[inline]
    pub fn invalid(parameter: Parameter, value: f64) -> Self {
        let (min, max) = parameter.domain();
        Self::InvalidParameter {
            parameter,
            value,
            min,
            max,
        }
    }
}

/// Result type for material operations.
pub type MaterialResult<T> = Result<T, MaterialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_uses_domain() {
        let err = MaterialError::invalid(Parameter::ReflectionFactor, 0.95);
        match err {
            MaterialError::InvalidParameter { min, max, .. } => {
                assert_eq!(min, 0.0);
                assert_eq!(max, 0.9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_messages() {
        let err = MaterialError::invalid(Parameter::RefractiveIndex, 2.5);
        assert_eq!(err.to_string(), "refractive index 2.5 outside [1, 2]");

        let err = MaterialError::InapplicableParameter {
            parameter: Parameter::Transmission,
            material_type: MaterialType::Painted,
        };
        assert_eq!(err.to_string(), "transmission does not apply to painted materials");
    }

    #[test]
    fn test_luminance_error_is_transparent() {
        let err: MaterialError = ColorError::InvalidLuminance(1.5).into();
        assert_eq!(err.to_string(), ColorError::InvalidLuminance(1.5).to_string());
    }
}
