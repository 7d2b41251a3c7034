use palette_dither::{DitherError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Unsupported PNG color type: {0}")]
    UnsupportedColorType(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
