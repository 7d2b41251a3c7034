pub mod matrix_text;
pub mod png_codec;

pub use matrix_text::format_matrix;
pub use png_codec::{decode_png, encode_indexed_png, optimize_png, DecodedImage};
