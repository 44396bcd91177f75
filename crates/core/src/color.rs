//! The validated 8-bit RGB color and its canonical HEX form.
//!
//! A [`Color`] can only be built through constructors that validate their
//! input, so every instance in circulation holds three channels in 0..=255.
//! HEX and RGB are two views of the same value: [`Color::to_hex`] is the
//! canonical `#RRGGBB` (uppercase, zero-padded) form, and
//! [`Color::from_hex`] accepts any case with or without the leading `#`.

use crate::error::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in `r, g, b` order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// The query parameter that carries this channel (`r`, `g` or `b`).
    pub fn query_name(self) -> &'static str {
        match self {
            Channel::Red => "r",
            Channel::Green => "g",
            Channel::Blue => "b",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        })
    }
}

/// Plain projection of a [`Color`] onto its channels.
///
/// This is the JSON shape returned by the HEX-to-RGB endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Channels {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An sRGB color with 8-bit integer channels.
///
/// Serializes as `{"r":..,"g":..,"b":..}`. Deserializes from either that
/// object or a HEX string; both paths go through the validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Builds a color from channels that are already known to be in range.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color such as `"#C0FFEE"`, `"c0ffee"` or `"#c0FFee"`.
    ///
    /// At most one leading `#` is stripped; what remains must be exactly six
    /// ASCII hex digits.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidFormat {
                input: input.to_string(),
            });
        }
        // All six bytes are ASCII, so these slices fall on char boundaries.
        let pair = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::InvalidFormat {
                input: input.to_string(),
            })
        };
        Ok(Self::new(pair(0)?, pair(2)?, pair(4)?))
    }

    /// Builds a color from numeric channel values.
    ///
    /// Each value must be a finite integer in 0..=255. Nothing is clamped or
    /// rounded: NaN, fractions, negatives and values above 255 are rejected,
    /// and the error names the first offending channel.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Result<Self, ColorError> {
        Ok(Self::new(
            checked_channel(Channel::Red, r)?,
            checked_channel(Channel::Green, g)?,
            checked_channel(Channel::Blue, b)?,
        ))
    }

    /// Canonical `#RRGGBB` form: uppercase, zero-padded, `#`-prefixed.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// The stored channels.
    pub fn to_channels(self) -> Channels {
        Channels {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Value of a single channel.
    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }
}

/// Range check shared by every numeric construction path.
pub(crate) fn checked_channel(channel: Channel, value: f64) -> Result<u8, ColorError> {
    if value.is_finite() && value.fract() == 0.0 && (0.0..=255.0).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ColorError::OutOfRange { channel, value })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_channels().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Hex(String),
    Channels { r: f64, g: f64, b: f64 },
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawColor::deserialize(deserializer)? {
            RawColor::Hex(s) => Color::from_hex(&s),
            RawColor::Channels { r, g, b } => Color::from_channels(r, g, b),
        }
        .map_err(serde::de::Error::custom)
    }
}
