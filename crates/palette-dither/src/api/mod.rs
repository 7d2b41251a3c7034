//! Public API for the palette-dither crate.
//!
//! This module provides the high-level API: the [`Ditherer`] builder, the
//! one-shot [`dither`] function and the [`DitherError`] unified error type.

mod builder;
mod error;

pub use builder::Ditherer;
pub use error::DitherError;

use crate::dither::{DitherOptions, DitherStrategy};
use crate::image::RgbImage;
use crate::output::IndexedImage;
use crate::palette::Palette;

/// Dither `image` to `palette` in one call.
///
/// Equivalent to building a [`Ditherer`] with `strategy` and `options`.
///
/// # Example
///
/// ```
/// use palette_dither::{dither, DitherOptions, DitherStrategy, Palette, Rgb, RgbImage};
///
/// let palette = Palette::from_packed(&[0x000000, 0xFFFFFF]).unwrap();
/// let image = RgbImage::new(2, 1, vec![Rgb::new(10, 10, 10), Rgb::new(250, 250, 250)]).unwrap();
/// let result = dither(&image, &palette, DitherStrategy::Nearest, &DitherOptions::new()).unwrap();
/// assert_eq!(result.indices(), &[0, 1]);
/// ```
pub fn dither(
    image: &RgbImage,
    palette: &Palette,
    strategy: DitherStrategy,
    options: &DitherOptions,
) -> Result<IndexedImage, DitherError> {
    Ditherer::new(palette.clone())
        .strategy(strategy)
        .options(options.clone())
        .dither(image)
}
