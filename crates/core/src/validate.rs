//! Request validation: from untrusted query parameters to a [`Color`].
//!
//! Three input modes mirror the three color endpoints. All of them go through
//! the `Color` constructors, so range and format rules live in one place.
//!
//! - [`InputMode::Hex`] requires `hex`.
//! - [`InputMode::Rgb`] requires `r`, `g` and `b`, validated together.
//! - [`InputMode::Any`] uses `hex` when it is present and the RGB triplet
//!   only when it is absent. A present `hex` decides alone: `r`/`g`/`b` are
//!   neither consulted nor cross-checked.

use crate::color::{checked_channel, Channel, Color};
use crate::error::ValidationError;
use crate::params::{parse_channel, QueryParams};

/// Name of the HEX query parameter.
pub const HEX_PARAM: &str = "hex";

/// Which color-specifying parameters a request accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Hex,
    Rgb,
    Any,
}

impl InputMode {
    /// Resolves `params` into a color according to this mode's rules.
    pub fn validate(self, params: &QueryParams) -> Result<Color, ValidationError> {
        match self {
            InputMode::Hex => validate_hex(params),
            InputMode::Rgb => validate_rgb(params),
            InputMode::Any => validate_any(params),
        }
    }
}

/// HEX-only mode: `hex` must be present and well formed.
pub fn validate_hex(params: &QueryParams) -> Result<Color, ValidationError> {
    let hex = params
        .non_empty(HEX_PARAM)
        .ok_or(ValidationError::MissingParameter { field: HEX_PARAM })?;
    Color::from_hex(hex).map_err(|source| ValidationError::InvalidFormat {
        field: HEX_PARAM,
        source,
    })
}

/// RGB-only mode: `r`, `g` and `b` must all be base-10 integers in 0..=255.
///
/// Every failing channel is listed in the single error returned.
pub fn validate_rgb(params: &QueryParams) -> Result<Color, ValidationError> {
    let mut values = [0u8; 3];
    let mut failed = Vec::new();
    for (slot, channel) in values.iter_mut().zip(Channel::ALL) {
        let parsed = params
            .get(channel.query_name())
            .and_then(parse_channel)
            .and_then(|v| checked_channel(channel, v).ok());
        match parsed {
            Some(v) => *slot = v,
            None => failed.push(channel.query_name()),
        }
    }
    if !failed.is_empty() {
        return Err(ValidationError::InvalidRgb { fields: failed });
    }
    let [r, g, b] = values;
    Ok(Color::new(r, g, b))
}

/// Either mode: a present `hex` decides alone, otherwise the RGB triplet is
/// required. A malformed `hex` never falls back to `r`/`g`/`b`.
pub fn validate_any(params: &QueryParams) -> Result<Color, ValidationError> {
    if params.is_present(HEX_PARAM) {
        return validate_hex(params).map_err(|_| ValidationError::NoColorProvided);
    }
    validate_rgb(params).map_err(|_| ValidationError::NoColorProvided)
}
