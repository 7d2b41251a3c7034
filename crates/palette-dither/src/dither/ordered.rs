//! Ordered (threshold matrix) dithering.
//!
//! Each pixel is perturbed by `factor * thresholds`, where `factor` comes
//! from a threshold matrix tiled over the image, and the perturbed value
//! is matched to the closest palette entry. Pixels are independent, so
//! rows run in parallel.
//!
//! The perturbation is not clamped; values above 255 are matched as they
//! are.

use rayon::prelude::*;

use super::{Dither, DitherOptions};
use crate::image::RgbImage;
use crate::matrix::{MatrixError, MatrixOrder, ThresholdMatrix};
use crate::palette::Palette;

/// Ordered dithering with a Bayer or cluster-dot matrix.
///
/// Reads `metric` and `thresholds` from the options.
///
/// # Example
///
/// ```
/// use palette_dither::{Dither, DitherOptions, OrderedDither, Palette, RgbImage};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// let image = RgbImage::from_gray(4, 4, &[96; 16]).unwrap();
/// let indices = OrderedDither::bayer(4)
///     .unwrap()
///     .dither(&image, &palette, &DitherOptions::new());
/// assert_eq!(indices.len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct OrderedDither {
    matrix: ThresholdMatrix,
}

impl OrderedDither {
    /// Bayer matrix of side `order` (a power of two, 2 to 256).
    pub fn bayer(order: usize) -> Result<Self, MatrixError> {
        Ok(Self::from_matrix(ThresholdMatrix::bayer(order)?))
    }

    /// Cluster-dot matrix of order `4`, `8` or `5x3`.
    pub fn cluster_dot(order: MatrixOrder) -> Result<Self, MatrixError> {
        Ok(Self::from_matrix(ThresholdMatrix::cluster_dot(order)?))
    }

    /// Any prebuilt threshold matrix.
    pub fn from_matrix(matrix: ThresholdMatrix) -> Self {
        Self { matrix }
    }

    /// The tiled threshold matrix.
    #[inline]
    pub fn matrix(&self) -> &ThresholdMatrix {
        &self.matrix
    }
}

impl Dither for OrderedDither {
    fn dither(&self, image: &RgbImage, palette: &Palette, options: &DitherOptions) -> Vec<u8> {
        let metric = options.metric_or_default();
        let t = options.thresholds;
        let width = image.width();
        let mut output = vec![0u8; image.pixels().len()];

        output
            .par_chunks_mut(width)
            .zip(image.pixels().par_chunks(width))
            .enumerate()
            .for_each(|(y, (out_row, in_row))| {
                for (x, (out, pixel)) in out_row.iter_mut().zip(in_row).enumerate() {
                    let factor = self.matrix.factor(x, y);
                    let p = pixel.to_f64();
                    let perturbed = [
                        p[0] + factor * t[0],
                        p[1] + factor * t[1],
                        p[2] + factor * t[2],
                    ];
                    *out = palette.closest_index(perturbed, metric) as u8;
                }
            });

        output
    }
}
