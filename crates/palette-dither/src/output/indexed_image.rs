//! IndexedImage: palette indices with dimensions and an owned palette.

use crate::color::Rgb;
use crate::image::RgbImage;
use crate::palette::{Palette, PaletteSource};

/// The result of dithering an image.
///
/// Stores one `u8` palette index per pixel in row-major order. The indexed
/// form is canonical; [`render()`](IndexedImage::render) and
/// [`to_rgb_bytes()`](IndexedImage::to_rgb_bytes) look the colors up.
///
/// An `IndexedImage` is a [`PaletteSource`], so its palette can be reused
/// to dither further images to the same colors.
///
/// # Example
///
/// ```
/// use palette_dither::{IndexedImage, Palette};
///
/// let palette = Palette::from_packed(&[0x000000, 0xFFFFFF]).unwrap();
/// let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.index(1, 0), Some(1));
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Wrap dithered indices.
    ///
    /// Every index must be below `palette.len()` and there must be exactly
    /// `width * height` of them (checked in debug builds).
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height,
        );
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < palette.len()),
            "index past the end of a {}-color palette",
            palette.len()
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// One palette index per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Index at column `x`, row `y`.
    pub fn index(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.indices[y * self.width + x])
    }

    /// Palette color of every pixel, row-major.
    pub fn render(&self) -> Vec<Rgb> {
        let colors = self.palette.colors();
        self.indices.iter().map(|&i| colors[i as usize]).collect()
    }

    /// Flat `[R, G, B, R, G, B, ...]` buffer of length `width * height * 3`.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let colors = self.palette.colors();
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&colors[idx as usize].to_bytes());
        }
        rgb
    }

    /// Rendered colors as an [`RgbImage`].
    pub fn to_image(&self) -> RgbImage {
        // dimensions were validated when the source image was built
        RgbImage::from_parts_unchecked(self.width, self.height, self.render())
    }

    /// Split into `(indices, width, height, palette)`.
    pub fn into_parts(self) -> (Vec<u8>, usize, usize, Palette) {
        (self.indices, self.width, self.height, self.palette)
    }
}

impl PaletteSource for IndexedImage {
    fn attached_palette(&self) -> Option<&[Rgb]> {
        Some(self.palette.colors())
    }

    fn source_kind(&self) -> String {
        "indexed image".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_palette() -> Palette {
        Palette::from_packed(&[0x000000, 0xFF0000, 0xFFFFFF]).unwrap()
    }

    #[test]
    fn test_new_stores_fields() {
        let image = IndexedImage::new(vec![0, 1, 2, 0, 1, 2], 3, 2, rgb_palette());
        assert_eq!(image.indices(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.palette().len(), 3);
    }

    #[test]
    fn test_index_bounds() {
        let image = IndexedImage::new(vec![0, 1, 2, 0, 1, 2], 3, 2, rgb_palette());
        assert_eq!(image.index(2, 0), Some(2));
        assert_eq!(image.index(0, 1), Some(0));
        assert_eq!(image.index(3, 0), None);
        assert_eq!(image.index(0, 2), None);
    }

    #[test]
    fn test_rgb_bytes_use_palette_colors() {
        let image = IndexedImage::new(vec![1, 2], 2, 1, rgb_palette());
        assert_eq!(image.to_rgb_bytes(), vec![255, 0, 0, 255, 255, 255]);
        assert_eq!(
            image.render(),
            vec![Rgb::new(255, 0, 0), Rgb::new(255, 255, 255)]
        );
    }

    #[test]
    fn test_to_image_keeps_dimensions() {
        let image = IndexedImage::new(vec![0, 1, 2, 1], 2, 2, rgb_palette());
        let rgb = image.to_image();
        assert_eq!(rgb.width(), 2);
        assert_eq!(rgb.height(), 2);
        assert_eq!(rgb.get(1, 1), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_attached_palette_round_trip() {
        let image = IndexedImage::new(vec![2], 1, 1, rgb_palette());
        let palette = Palette::from_indexed_source(&image).unwrap();
        assert_eq!(palette, rgb_palette());
    }
}
