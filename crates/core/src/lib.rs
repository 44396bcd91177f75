#![deny(unsafe_code)]
//! Core types for the hexrgb color converter.
//!
//! Provides the validated [`Color`] value (HEX/RGB parsing and canonical
//! formatting), [`QueryParams`] decoding, and the request validator that turns
//! untrusted query parameters into a `Color` or a [`ValidationError`].

pub mod color;
pub mod error;
pub mod params;
pub mod validate;

pub use color::{Channel, Channels, Color};
pub use error::{ColorError, ValidationError};
pub use params::QueryParams;
pub use validate::InputMode;
