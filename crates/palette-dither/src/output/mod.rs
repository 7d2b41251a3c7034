//! Output types for the dithering pipeline.
//!
//! [`IndexedImage`] is what every high-level dithering call returns:
//! palette indices plus the dimensions and the palette that produced them.
//! RGB buffers are derived on demand.

mod indexed_image;

pub use indexed_image::IndexedImage;
