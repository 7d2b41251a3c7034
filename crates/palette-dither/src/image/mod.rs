//! Input image buffer.
//!
//! [`RgbImage`] is the row-major pixel grid every ditherer reads. Pixel
//! `(x, y)` is column `x` of row `y`.

mod rgb_image;

pub use rgb_image::{ImageError, RgbImage};
