//! Yliluoma's ordered dithering (algorithm 1).
//!
//! For every pixel the closest mixing plan is looked up in a
//! [`MixingPlanTable`]; the transposed Bayer factor at the pixel then
//! decides which of the plan's two indices is shown. Over a matrix tile
//! the second index appears on a `ratio` share of the pixels.

use rayon::prelude::*;

use super::{Dither, DitherOptions};
use crate::color::DistanceMetric;
use crate::image::RgbImage;
use crate::matrix::{MatrixError, ThresholdMatrix};
use crate::mixing::MixingPlanTable;
use crate::palette::Palette;

/// Mixing-plan ordered dithering.
///
/// The metric defaults to [`DistanceMetric::Psychovisual`] when the
/// options leave it unset. `thresholds` is not used.
#[derive(Debug, Clone)]
pub struct Yliluoma {
    order: usize,
    matrix: ThresholdMatrix,
}

impl Yliluoma {
    /// Ditherer for a Bayer matrix of side `order` (a power of two).
    pub fn new(order: usize) -> Result<Self, MatrixError> {
        Ok(Self {
            order,
            matrix: ThresholdMatrix::bayer_mixing(order)?,
        })
    }

    /// Side of the Bayer matrix, and the ratio resolution `1 / order²`.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Build the plan table this ditherer would use for `palette`.
    pub fn plan_table(&self, palette: &Palette, metric: DistanceMetric) -> MixingPlanTable {
        MixingPlanTable::build_unchecked(palette, self.order, metric)
    }
}

impl Dither for Yliluoma {
    fn dither(&self, image: &RgbImage, palette: &Palette, options: &DitherOptions) -> Vec<u8> {
        let metric = options.metric.unwrap_or(DistanceMetric::Psychovisual);
        let table = self.plan_table(palette, metric);
        let width = image.width();
        let mut output = vec![0u8; image.pixels().len()];

        output
            .par_chunks_mut(width)
            .zip(image.pixels().par_chunks(width))
            .enumerate()
            .for_each(|(y, (out_row, in_row))| {
                for (x, (out, pixel)) in out_row.iter_mut().zip(in_row).enumerate() {
                    let plan = table.pick(pixel.to_f64());
                    *out = plan.select(self.matrix.factor(x, y));
                }
            });

        output
    }
}
