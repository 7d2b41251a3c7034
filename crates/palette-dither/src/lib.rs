#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! palette-dither: palette-constrained dithering
//!
//! This library maps RGB images onto a fixed palette of up to 256 colors
//! and returns one palette index per pixel. Four families of algorithms
//! are provided: plain nearest color, error diffusion, ordered dithering
//! with Bayer or cluster-dot matrices, and Yliluoma's mixing-plan ordered
//! dithering.
//!
//! # Quick Start
//!
//! The [`Ditherer`] builder is the primary entry point:
//!
//! ```
//! use palette_dither::{DiffusionKernel, Ditherer, Palette, RgbImage};
//!
//! let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
//! let image = RgbImage::from_gray(2, 2, &[128; 4]).unwrap();
//!
//! let result = Ditherer::new(palette)
//!     .kernel(DiffusionKernel::FloydSteinberg)
//!     .dither(&image)
//!     .unwrap();
//!
//! assert_eq!(result.indices(), &[1, 0, 0, 1]);
//! ```
//!
//! # Strategies
//!
//! | [`DitherStrategy`] | Reads | Parallel |
//! |--------------------|-------|----------|
//! | `Nearest` | metric | yes |
//! | `ErrorDiffusion` | metric, kernel | no, raster order |
//! | `Bayer` | metric, order, thresholds | yes |
//! | `ClusterDot` | metric, order, thresholds | yes |
//! | `Yliluoma` | metric, order | yes |
//!
//! The metric defaults to Euclidean distance, except for Yliluoma where it
//! defaults to the psychovisual metric.
//!
//! # Palettes
//!
//! A [`Palette`] can be built from [`Rgb`] values, hex strings, packed
//! `0xRRGGBB` integers, a flat byte buffer, the palette attached to an
//! [`IndexedImage`], or by median cut over an image
//! ([`Palette::median_cut`]).

pub mod api;
pub mod color;
pub mod dither;
pub mod image;
pub mod matrix;
pub mod mixing;
pub mod output;
pub mod palette;


pub use api::{dither, DitherError, Ditherer};
pub use color::{DistanceMetric, MetricError, Rgb};
pub use dither::{
    DiffusionKernel, Dither, DitherOptions, DitherStrategy, ErrorDiffusion, Kernel, NearestColor,
    OrderedDither, Yliluoma,
};
pub use image::{ImageError, RgbImage};
pub use matrix::{MatrixError, MatrixOrder, ThresholdMatrix};
pub use mixing::{MixingPlan, MixingPlanTable};
pub use output::IndexedImage;
pub use palette::{Palette, PaletteError, PaletteSource, ParseColorError};
