//! Error types for matsync-core operations.
//!
//! Raised when a raw triple is promoted to a display color and one of its
//! channels falls outside the unit range.
//!
//! # Usage
//!
//! ```rust
//! use matsync_core::{Rgb, Srgb, Error};
//!
//! let err = Rgb::<Srgb>::try_unit([0.5, 1.5, 0.0]).unwrap_err();
//! assert!(matches!(err, Error::ChannelOutOfRange { channel: 1, .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when validating color values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A channel lies outside [0, 1].
    #[error("channel {channel} value {value} outside [0, 1]")]
    ChannelOutOfRange {
        /// Channel index (0 = R, 1 = G, 2 = B)
        channel: usize,
        /// Offending value
        value: f64,
    },

    /// A channel is NaN or infinite.
    #[error("channel {channel} is not finite")]
    NonFinite {
        /// Channel index (0 = R, 1 = G, 2 = B)
        channel: usize,
    },
}

impl Error {
    /// The offending value, NaN for non-finite channels.
    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Self::ChannelOutOfRange { value, .. } => *value,
            Self::NonFinite { .. } => f64::NAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = Error::ChannelOutOfRange { channel: 2, value: 1.25 };
        let msg = err.to_string();
        assert!(msg.contains("channel 2"));
        assert!(msg.contains("1.25"));
    }

    #[test]
    fn test_non_finite_value_is_nan() {
        let err = Error::NonFinite { channel: 0 };
        assert!(err.value().is_nan());
    }
}
