//! PNG boundary: decode any PNG to 8-bit RGB, encode dithered output as an
//! indexed PNG.

use std::io::Cursor;

use palette_dither::{IndexedImage, PaletteSource, Rgb, RgbImage};

use crate::error::RenderError;

/// A decoded PNG, with the PLTE of indexed files kept as the attached palette.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: RgbImage,
    palette: Option<Vec<Rgb>>,
    color_type: png::ColorType,
}

impl DecodedImage {
    /// Color type as stored in the file, before expansion.
    pub fn source_color_type(&self) -> png::ColorType {
        self.color_type
    }
}

impl PaletteSource for DecodedImage {
    fn attached_palette(&self) -> Option<&[Rgb]> {
        self.palette.as_deref()
    }

    fn source_kind(&self) -> String {
        format!("{:?} PNG", self.color_type)
    }
}

/// Decode a PNG into 8-bit RGB.
///
/// Palettes and low bit depths are expanded, 16-bit samples are stripped to
/// 8 bits, alpha is dropped and gray is broadcast to all three channels.
pub fn decode_png(data: &[u8]) -> Result<DecodedImage, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::Decode(e.to_string()))?;

    let info = reader.info();
    let color_type = info.color_type;
    let palette = match (color_type, info.palette.as_ref()) {
        (png::ColorType::Indexed, Some(plte)) => Some(
            plte.chunks_exact(3)
                .map(|c| Rgb::new(c[0], c[1], c[2]))
                .collect::<Vec<_>>(),
        ),
        (png::ColorType::Indexed, None) => {
            return Err(RenderError::UnsupportedColorType(
                "indexed PNG without PLTE".to_string(),
            ))
        }
        _ => None,
    };

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::Decode(e.to_string()))?;
    let bytes = &buf[..frame.buffer_size()];

    let pixels: Vec<Rgb> = match frame.color_type {
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect(),
        png::ColorType::Rgba => bytes
            .chunks_exact(4)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect(),
        png::ColorType::Grayscale => bytes.iter().map(|&v| Rgb::new(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .map(|c| Rgb::new(c[0], c[0], c[0]))
            .collect(),
        other => {
            return Err(RenderError::UnsupportedColorType(format!(
                "{other:?} after expansion"
            )))
        }
    };

    let image = RgbImage::new(frame.width as usize, frame.height as usize, pixels)
        .map_err(|e| RenderError::Decode(e.to_string()))?;

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        color_type = ?color_type,
        attached_colors = palette.as_ref().map(Vec::len),
        "Decoded PNG"
    );

    Ok(DecodedImage {
        image,
        palette,
        color_type,
    })
}

/// Encode a dithered image as an indexed PNG.
///
/// The PLTE holds the palette in order, so pixel values are the dither
/// indices. Rows are packed to the smallest of 1, 2, 4 or 8 bits that fits
/// the palette.
pub fn encode_indexed_png(image: &IndexedImage) -> Result<Vec<u8>, RenderError> {
    let width = u32::try_from(image.width())
        .map_err(|_| RenderError::Encode(format!("width {} too large", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| RenderError::Encode(format!("height {} too large", image.height())))?;

    let (bit_depth, bits) = bit_depth_for(image.palette().len());
    let plte = image.palette().to_flat();
    let packed = if bits == 8 {
        image.indices().to_vec()
    } else {
        pack_nbits(image.indices(), image.width(), bits)
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress with oxipng (zopfli + adaptive filter selection).
///
/// Returns the input unchanged if oxipng fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping original");
            png_bytes
        }
    }
}

fn bit_depth_for(colors: usize) -> (png::BitDepth, u8) {
    match colors {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = indices.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
