//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

/// Error type for parsing hex color strings and packed color values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    /// Nothing left after stripping the `#` or `0x` prefix
    #[error("empty hex color")]
    Empty,
    /// More than six hex digits
    #[error("hex color has {len} digits, at most 6 are allowed")]
    TooLong {
        /// Number of digits after the prefix
        len: usize,
    },
    /// A character that is not a hex digit
    #[error("invalid hex digit {digit:?}")]
    InvalidDigit {
        /// The offending character
        digit: char,
    },
    /// Integer conversion failed
    #[error("invalid hex color: {0}")]
    InvalidHex(#[from] ParseIntError),
    /// Packed value wider than 24 bits
    #[error("packed color {value:#x} exceeds 0xffffff")]
    OutOfRange {
        /// The rejected value
        value: u32,
    },
}

/// Error type for palette construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// No colors provided
    #[error("palette cannot be empty")]
    Empty,
    /// More colors than a `u8` index can address
    #[error("palette has {len} colors, at most 256 are supported")]
    TooManyColors {
        /// Number of colors supplied
        len: usize,
    },
    /// Lookup past the end of the palette
    #[error("palette index {index} out of range for {len} colors")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Palette length
        len: usize,
    },
    /// The source carries no discrete palette to extract
    #[error("{kind} has no attached palette")]
    NoAttachedPalette {
        /// Human readable description of the source
        kind: String,
    },
    /// Flat `[r, g, b, ...]` input whose length is not a multiple of three
    #[error("flat palette length {len} is not a multiple of 3")]
    InvalidFlatLength {
        /// Number of bytes supplied
        len: usize,
    },
    /// A color entry failed to parse
    #[error("invalid color at index {index}: {error}")]
    ParseColor {
        /// Position of the entry
        index: usize,
        /// Underlying parse error
        #[source]
        error: ParseColorError,
    },
    /// Requested median-cut size outside `1..=256`
    #[error("median cut needs between 1 and 256 colors, got {requested}")]
    InvalidColorCount {
        /// The requested number of colors
        requested: usize,
    },
    /// Median cut channel outside `0..3`
    #[error("channel {channel} out of range, expected 0, 1 or 2")]
    InvalidChannel {
        /// The requested channel
        channel: usize,
    },
}
