//! Error types for hexrgb core.
//!
//! [`ColorError`] is produced by the `Color` constructors. [`ValidationError`]
//! is produced by the request validator and is what the HTTP layer turns into
//! a 400 response; its `Display` is the short client-facing message.

use crate::color::Channel;
use thiserror::Error;

/// Errors produced by the `Color` constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// A HEX string was not exactly six hex digits after an optional `#`.
    #[error("invalid hex color '{input}': expected 6 hex digits with optional leading '#'")]
    InvalidFormat { input: String },

    /// A channel value was NaN, fractional, negative or above 255.
    #[error("{channel} channel out of range: {value} (expected an integer in 0..=255)")]
    OutOfRange { channel: Channel, value: f64 },
}

/// A rejected set of request parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required parameter was absent or empty.
    #[error("{} value not given", .field.to_uppercase())]
    MissingParameter { field: &'static str },

    /// The `hex` parameter was present but malformed.
    #[error("Invalid HEX value")]
    InvalidFormat {
        field: &'static str,
        #[source]
        source: ColorError,
    },

    /// One or more of `r`, `g`, `b` was missing, non-numeric or out of range.
    #[error("Invalid RGB values")]
    InvalidRgb { fields: Vec<&'static str> },

    /// Neither a usable `hex` nor a complete RGB triplet was supplied.
    #[error("Invalid color values")]
    NoColorProvided,
}

impl ValidationError {
    /// Names of the query parameters responsible for the failure.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::MissingParameter { field }
            | ValidationError::InvalidFormat { field, .. } => vec![*field],
            ValidationError::InvalidRgb { fields } => fields.clone(),
            ValidationError::NoColorProvided => vec!["hex", "r", "g", "b"],
        }
    }

    /// Stable machine-readable name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter { .. } => "missing_parameter",
            ValidationError::InvalidFormat { .. } => "invalid_format",
            ValidationError::InvalidRgb { .. } => "invalid_rgb",
            ValidationError::NoColorProvided => "no_color_provided",
        }
    }
}
