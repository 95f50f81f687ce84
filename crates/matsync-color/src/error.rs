//! Error types for luminance remapping.

use thiserror::Error;

/// Color operation error.
///
/// Degenerate (all-black) input is not an error: it is recovered by
/// substituting the neutral weight vector and reported through
/// [`crate::RemapReport::degenerate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    /// Target luminance outside [0, 1] (or NaN).
    #[error("invalid target luminance {0}: expected a value in [0, 1]")]
    InvalidLuminance(f64),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;

/// Rejects targets outside [0, 1]; NaN fails the range check.
#[inline]
pub(crate) fn check_luminance(target_y: f64) -> ColorResult<()> {
    if (0.0..=1.0).contains(&target_y) {
        Ok(())
    } else {
        Err(ColorError::InvalidLuminance(target_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_luminance_bounds() {
        assert!(check_luminance(0.0).is_ok());
        assert!(check_luminance(1.0).is_ok());
        assert_eq!(check_luminance(1.0001), Err(ColorError::InvalidLuminance(1.0001)));
        assert!(check_luminance(-0.5).is_err());
        assert!(check_luminance(f64::NAN).is_err());
    }

    #[test]
    fn test_message_names_value() {
        assert!(ColorError::InvalidLuminance(2.5).to_string().contains("2.5"));
    }
}
