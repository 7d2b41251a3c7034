//! 8-bit RGB color type
//!
//! Colors interconvert losslessly between three channels, a packed
//! `0xRRGGBB` integer and a hex string.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color with three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Largest valid packed value.
    pub const MAX_PACKED: u32 = 0x00FF_FFFF;

    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `[r, g, b]` array.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Return the channels as a `[r, g, b]` array.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Pack into `(r << 16) | (g << 8) | b`.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack a `0xRRGGBB` integer.
    ///
    /// Values above `0xFFFFFF` are rejected rather than masked.
    ///
    /// # Example
    ///
    /// ```
    /// use palette_dither::Rgb;
    ///
    /// assert_eq!(Rgb::from_packed(0x82f698).unwrap(), Rgb::new(130, 246, 152));
    /// assert!(Rgb::from_packed(0x0100_0000).is_err());
    /// ```
    pub fn from_packed(value: u32) -> Result<Self, ParseColorError> {
        if value > Self::MAX_PACKED {
            return Err(ParseColorError::OutOfRange { value });
        }
        Ok(Self::new(
            (value >> 16) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ))
    }

    /// Channels as floating point values in `0.0..=255.0`.
    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Round and clamp floating point channels back to 8 bits.
    #[inline]
    pub fn from_f64(values: [f64; 3]) -> Self {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(channel(values[0]), channel(values[1]), channel(values[2]))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color.
    ///
    /// A leading `#` or `0x` is stripped and the remaining digits are read
    /// as one base-16 integer, so `"#012345"` is `(1, 35, 69)` and short
    /// inputs are zero-extended on the left (`"ff"` is `(0, 0, 255)`).
    /// Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.is_empty() {
            return Err(ParseColorError::Empty);
        }
        if digits.len() > 6 {
            return Err(ParseColorError::TooLong { len: digits.len() });
        }
        // from_str_radix would also accept a sign
        if let Some(digit) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit { digit });
        }

        let value = u32::from_str_radix(digits, 16)?;
        Self::from_packed(value)
    }
}
