//! sRGB color type
//!
//! Pixels arrive from image decoders and palettes are specified as 8-bit
//! hex triples, so the channels are stored as `u8` without conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// A color in 8-bit sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Srgb {
    /// Red channel (gamma-corrected, 0..=255)
    pub r: u8,
    /// Green channel (gamma-corrected, 0..=255)
    pub g: u8,
    /// Blue channel (gamma-corrected, 0..=255)
    pub b: u8,
}

impl Srgb {
    /// Create an Srgb color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use gr_pack::Srgb;
    /// let teal = Srgb::from_u8(0x03, 0x46, 0x53);
    /// assert_eq!(teal.g, 0x46);
    /// ```
    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from a packed `0xRRGGBB` value.
    ///
    /// # Example
    /// ```
    /// use gr_pack::Srgb;
    /// assert_eq!(Srgb::from_rgb24(0x9b5446), Srgb::from_u8(0x9b, 0x54, 0x46));
    /// ```
    #[inline]
    pub const fn from_rgb24(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Srgb {
    /// Formats as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gr_pack::Srgb;
    ///
    /// let grey: Srgb = "#787878".parse().unwrap();
    /// assert_eq!(grey, Srgb::from_u8(0x78, 0x78, 0x78));
    ///
    /// let white: Srgb = "fff".parse().unwrap();
    /// assert_eq!(white, Srgb::from_u8(255, 255, 255));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match *digits.as_slice() {
            // Shorthand: 0xF -> 0xFF
            [r, g, b] => Ok(Self::from_u8(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::from_u8(
                r1 << 4 | r0,
                g1 << 4 | g0,
                b1 << 4 | b0,
            )),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
