//! True-color input images.

use crate::color::Rgb;
use crate::palette::PaletteSource;

/// Error type for image construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// Zero width or height
    #[error("image must not be empty, got {width}x{height}")]
    Empty {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Buffer length does not match the dimensions
    #[error("expected {expected} values for the image dimensions, got {actual}")]
    DimensionMismatch {
        /// Values implied by width, height and channel count
        expected: usize,
        /// Values supplied
        actual: usize,
    },
}

/// A row-major grid of 8-bit RGB pixels.
///
/// Both dimensions are at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wrap a pixel buffer.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ImageError> {
        check_dimensions(width, height, pixels.len(), 1)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_parts_unchecked(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, ImageError> {
        Self::new(width, height, vec![color; width * height])
    }

    /// Interleaved `[r, g, b, ...]` bytes.
    pub fn from_raw_rgb(width: usize, height: usize, data: &[u8]) -> Result<Self, ImageError> {
        check_dimensions(width, height, data.len(), 3)?;
        let pixels = data
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Single-channel values, each broadcast to all three channels.
    pub fn from_gray(width: usize, height: usize, data: &[u8]) -> Result<Self, ImageError> {
        check_dimensions(width, height, data.len(), 1)?;
        let pixels = data.iter().map(|&v| Rgb::new(v, v, v)).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Columns, at least 1.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows, at least 1.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Interleaved `[r, g, b, ...]` bytes.
    pub fn to_raw_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }
}

impl PaletteSource for RgbImage {
    fn attached_palette(&self) -> Option<&[Rgb]> {
        None
    }

    fn source_kind(&self) -> String {
        format!("{}x{} RGB image", self.width, self.height)
    }
}

fn check_dimensions(
    width: usize,
    height: usize,
    len: usize,
    channels: usize,
) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::Empty { width, height });
    }
    let expected = width * height * channels;
    if len != expected {
        return Err(ImageError::DimensionMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert_eq!(
            RgbImage::new(0, 3, vec![]),
            Err(ImageError::Empty {
                width: 0,
                height: 3
            })
        );
        assert_eq!(
            RgbImage::from_gray(2, 2, &[1, 2, 3]),
            Err(ImageError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            RgbImage::from_raw_rgb(1, 1, &[1, 2]),
            Err(ImageError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_gray_broadcasts_to_all_channels() {
        let image = RgbImage::from_gray(2, 1, &[7, 200]).unwrap();
        assert_eq!(image.get(0, 0), Some(Rgb::new(7, 7, 7)));
        assert_eq!(image.get(1, 0), Some(Rgb::new(200, 200, 200)));
        assert_eq!(image.get(2, 0), None);
    }

    #[test]
    fn test_coordinates_are_column_row() {
        let image = RgbImage::from_raw_rgb(2, 2, &[0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3]).unwrap();
        assert_eq!(image.get(1, 0), Some(Rgb::new(1, 1, 1)));
        assert_eq!(image.get(0, 1), Some(Rgb::new(2, 2, 2)));
        assert_eq!(image.rows().count(), 2);
        assert_eq!(image.to_raw_rgb().len(), 12);
    }

    #[test]
    fn test_true_color_image_has_no_palette() {
        let image = RgbImage::filled(3, 2, Rgb::default()).unwrap();
        assert!(image.attached_palette().is_none());
        assert_eq!(image.source_kind(), "3x2 RGB image");
    }
}
