//! Dithering algorithms.
//!
//! # Algorithms
//!
//! - [`NearestColor`]: plain closest-color mapping, no dithering
//! - [`ErrorDiffusion`]: sequential scan that pushes each pixel's
//!   quantization error onto unvisited neighbors through a [`Kernel`]
//! - [`OrderedDither`]: adds a tiled threshold pattern (Bayer or
//!   cluster-dot) to each pixel before the closest-color lookup
//! - [`Yliluoma`]: picks the best two-color mixing plan per pixel and lets
//!   a transposed Bayer matrix decide which of the two to show
//!
//! # Architecture
//!
//! All algorithms implement the [`Dither`] trait. Configuration is done
//! via [`DitherOptions`]. Tables (threshold matrices, mixing plans) are
//! built before the pixel loop and only read during it, so the
//! pixel-independent algorithms run rows in parallel.
//!
//! # Example
//!
//! ```
//! use palette_dither::{Dither, DitherOptions, ErrorDiffusion, DiffusionKernel, Palette, RgbImage};
//!
//! let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
//! let image = RgbImage::from_gray(2, 2, &[128; 4]).unwrap();
//! let indices = ErrorDiffusion::new(DiffusionKernel::FloydSteinberg)
//!     .dither(&image, &palette, &DitherOptions::new());
//! assert_eq!(indices, vec![1, 0, 0, 1]);
//! ```

mod error_diffusion;
mod kernel;
mod nearest;
mod options;
mod ordered;
mod yliluoma;

use std::fmt;
use std::str::FromStr;

pub use error_diffusion::ErrorDiffusion;
pub use kernel::*;
pub use nearest::NearestColor;
pub use options::{DitherOptions, DEFAULT_THRESHOLDS};
pub use ordered::OrderedDither;
pub use yliluoma::Yliluoma;

use crate::api::DitherError;
use crate::color::DistanceMetric;
use crate::image::RgbImage;
use crate::palette::Palette;

/// Dithering strategy selection for the builder API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherStrategy {
    /// Closest color per pixel.
    Nearest,

    /// Error diffusion with [`DitherOptions::kernel`].
    #[default]
    ErrorDiffusion,

    /// Ordered dithering with a Bayer matrix of [`DitherOptions::order`].
    Bayer,

    /// Ordered dithering with a cluster-dot matrix (`4`, `8` or `5x3`).
    ClusterDot,

    /// Yliluoma's mixing-plan ordered dithering.
    ///
    /// Cost grows with `N² * order²` table entries per pixel, so keep
    /// palettes small or orders low for large images.
    Yliluoma,
}

impl DitherStrategy {
    /// Every strategy, in display order.
    pub const ALL: [DitherStrategy; 5] = [
        Self::Nearest,
        Self::ErrorDiffusion,
        Self::Bayer,
        Self::ClusterDot,
        Self::Yliluoma,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::ErrorDiffusion => "error-diffusion",
            Self::Bayer => "bayer",
            Self::ClusterDot => "cluster-dot",
            Self::Yliluoma => "yliluoma",
        }
    }

    /// Whether the strategy tiles a threshold matrix.
    pub fn is_ordered(&self) -> bool {
        matches!(self, Self::Bayer | Self::ClusterDot | Self::Yliluoma)
    }
}

impl fmt::Display for DitherStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherStrategy {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "nearest" | "none" => Ok(Self::Nearest),
            "error-diffusion" | "diffusion" => Ok(Self::ErrorDiffusion),
            "bayer" | "ordered" => Ok(Self::Bayer),
            "cluster-dot" | "cluster" => Ok(Self::ClusterDot),
            "yliluoma" => Ok(Self::Yliluoma),
            _ => Err(DitherError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Trait for dithering algorithms.
///
/// Implementors map an image to one palette index per pixel.
pub trait Dither {
    /// Dither an image to palette indices.
    ///
    /// # Arguments
    ///
    /// * `image` - Input pixels
    /// * `palette` - Colors to quantize to
    /// * `options` - Dithering configuration
    ///
    /// # Returns
    ///
    /// A `Vec<u8>` of palette indices, one per pixel, in row-major order.
    /// Each index is in the range `0..palette.len()`.
    fn dither(&self, image: &RgbImage, palette: &Palette, options: &DitherOptions) -> Vec<u8>;
}

/// Core error diffusion loop parameterized by kernel.
///
/// Works on an owned `f64` copy of the image. For each pixel in raster
/// order the accumulated value is clamped to `[0, 255]`, matched to the
/// closest palette entry, and `value - entry` is spread over the kernel's
/// in-bounds neighbors. Contributions that fall outside the image are
/// dropped.
pub(crate) fn dither_with_kernel(
    image: &RgbImage,
    palette: &Palette,
    kernel: &Kernel,
    metric: DistanceMetric,
) -> Vec<u8> {
    let width = image.width();
    let height = image.height();
    let mut buffer: Vec<[f64; 3]> = image.pixels().iter().map(|p| p.to_f64()).collect();
    let mut output = vec![0u8; width * height];
    let weights: Vec<(i32, i32, f64)> = kernel.normalized().collect();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = buffer[idx].map(|c| c.clamp(0.0, 255.0));
            let nearest = palette.closest_index(value, metric);
            output[idx] = nearest as u8;

            let chosen = palette.value(nearest);
            let error = [
                value[0] - chosen[0],
                value[1] - chosen[1],
                value[2] - chosen[2],
            ];

            for &(dx, dy, weight) in &weights {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let target = &mut buffer[ny as usize * width + nx as usize];
                for c in 0..3 {
                    target[c] += error[c] * weight;
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in DitherStrategy::ALL {
            assert_eq!(strategy.name().parse::<DitherStrategy>().unwrap(), strategy);
            assert_eq!(strategy.to_string(), strategy.name());
        }
        assert_eq!(
            "Cluster_Dot".parse::<DitherStrategy>().unwrap(),
            DitherStrategy::ClusterDot
        );
        assert!(matches!(
            "random".parse::<DitherStrategy>(),
            Err(DitherError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_ordered_flag() {
        assert!(!DitherStrategy::Nearest.is_ordered());
        assert!(!DitherStrategy::ErrorDiffusion.is_ordered());
        assert!(DitherStrategy::Bayer.is_ordered());
        assert!(DitherStrategy::Yliluoma.is_ordered());
    }

    #[test]
    fn test_diffusion_keeps_bottom_right_error_in_bounds() {
        // every kernel must survive a 1x1 and a 1-row image
        let palette = Palette::from_packed(&[0x000000, 0xFFFFFF]).unwrap();
        for kernel in DiffusionKernel::ALL {
            for (w, h) in [(1, 1), (5, 1), (1, 5)] {
                let image = RgbImage::from_gray(w, h, &vec![100; w * h]).unwrap();
                let out =
                    dither_with_kernel(&image, &palette, kernel.kernel(), DistanceMetric::EUCLIDEAN);
                assert_eq!(out.len(), w * h, "{kernel} on {w}x{h}");
            }
        }
    }
}
