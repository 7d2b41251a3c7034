//! Closest-color mapping without dithering.

use rayon::prelude::*;

use super::{Dither, DitherOptions};
use crate::image::RgbImage;
use crate::palette::Palette;

/// Maps every pixel to its closest palette entry.
///
/// Useful as a baseline and for images that already use palette colors.
/// Reads only `metric` from the options.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestColor;

impl Dither for NearestColor {
    fn dither(&self, image: &RgbImage, palette: &Palette, options: &DitherOptions) -> Vec<u8> {
        let metric = options.metric_or_default();
        let width = image.width();
        let mut output = vec![0u8; image.pixels().len()];

        output
            .par_chunks_mut(width)
            .zip(image.pixels().par_chunks(width))
            .for_each(|(out_row, in_row)| {
                for (out, pixel) in out_row.iter_mut().zip(in_row) {
                    *out = palette.closest_index(pixel.to_f64(), metric) as u8;
                }
            });

        output
    }
}
