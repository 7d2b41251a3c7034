//! Assertion helpers for tests.

use std::collections::HashSet;

use palette_dither::{Palette, Rgb};
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert the PNG is indexed with exactly `colors` PLTE entries, returning
/// the raw bit depth
pub fn assert_indexed_png(bytes: &[u8], colors: usize) -> png::BitDepth {
    assert_png(bytes);
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().expect("readable PNG");
    let info = reader.info();
    assert_eq!(info.color_type, png::ColorType::Indexed, "Expected indexed PNG");
    let plte = info.palette.as_ref().expect("PLTE chunk");
    assert_eq!(plte.len(), colors * 3, "Expected {colors} PLTE entries");
    info.bit_depth
}

/// Assert every pixel is one of the palette colors
pub fn assert_only_palette_colors(pixels: &[Rgb], palette: &Palette) {
    let allowed: HashSet<Rgb> = palette.colors().iter().copied().collect();
    for (i, pixel) in pixels.iter().enumerate() {
        assert!(
            allowed.contains(pixel),
            "Pixel {i} is {pixel}, not a palette color"
        );
    }
}
