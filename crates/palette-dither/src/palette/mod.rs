//! Palette types and utilities
//!
//! This module provides the immutable [`Palette`], its closest-color
//! queries, median-cut construction, and the error types for parsing and
//! validation.

mod error;
mod median_cut;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteSource, MAX_COLORS};
