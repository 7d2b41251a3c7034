//! Unified error type for the palette-dither public API.
//!
//! [`DitherError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use crate::color::MetricError;
use crate::image::ImageError;
use crate::matrix::MatrixError;
use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the palette-dither public API.
///
/// Every variant is raised while validating inputs or building tables,
/// before any pixel is processed.
///
/// # Example
///
/// ```
/// use palette_dither::{DitherError, Palette};
///
/// fn create_palette() -> Result<Palette, DitherError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// # create_palette().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DitherError {
    /// Palette validation or lookup error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string or packed value)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Unsupported or unparsable matrix order
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
    /// Degenerate or mismatched image buffer
    #[error("image error: {0}")]
    Image(#[from] ImageError),
    /// Invalid distance metric
    #[error("metric error: {0}")]
    Metric(#[from] MetricError),
    /// Strategy name not recognized
    #[error("unknown dither strategy {0:?}")]
    UnknownStrategy(String),
    /// Kernel name not recognized
    #[error("unknown diffusion kernel {0:?}")]
    UnknownKernel(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixOrder;

    #[test]
    fn test_messages_wrap_the_source() {
        assert_eq!(
            DitherError::from(PaletteError::Empty).to_string(),
            "palette error: palette cannot be empty"
        );
        assert_eq!(
            DitherError::UnknownKernel("foo".to_string()).to_string(),
            "unknown diffusion kernel \"foo\""
        );
        let matrix = MatrixError::UnsupportedOrder {
            kind: "bayer",
            order: MatrixOrder::Square(3),
            supported: "powers of two from 2 to 256".to_string(),
        };
        assert_eq!(
            DitherError::from(matrix).to_string(),
            "matrix error: unsupported bayer matrix order 3, supported orders: powers of two from 2 to 256"
        );
    }

    #[test]
    fn test_from_conversions() {
        let err: DitherError = ImageError::Empty {
            width: 0,
            height: 0,
        }
        .into();
        assert!(matches!(err, DitherError::Image(_)));

        let err: DitherError = ParseColorError::Empty.into();
        assert!(matches!(err, DitherError::ParseColor(_)));
    }
}
