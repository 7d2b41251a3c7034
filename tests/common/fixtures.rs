//! Test fixtures: PNG builders and config files.

use std::fs;
use std::path::{Path, PathBuf};

/// Colors of the embedded `yliluoma16` palette
pub const YLILUOMA16: [u32; 16] = [
    0x080000, 0x201A0B, 0x432817, 0x492910, 0x234309, 0x5D4F1E, 0x9C6B20, 0xA9220F, 0x2B347C,
    0x2B7409, 0xD0CA40, 0xE8A077, 0x6A94AB, 0xD5C4B3, 0xFCE76E, 0xFCFAE2,
];

/// Minimal config with one palette and two profiles
pub const SMALL_CONFIG: &str = r##"
palettes:
  duo: ["#000000", "#FFFFFF"]
  warm: ["#200000", "#C04000", "#FFE0A0"]
profiles:
  mono:
    palette: duo
    strategy: bayer
    order: 4
  sunset:
    palette: warm
    strategy: cluster-dot
    order: 5x3
default_profile: mono
"##;

fn encode(
    width: u32,
    height: u32,
    color: png::ColorType,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(plte) = plte {
            encoder.set_palette(plte.to_vec());
        }
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(data).expect("PNG data");
    }
    buf
}

/// 8-bit grayscale PNG
pub fn png_gray(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    encode(width, height, png::ColorType::Grayscale, None, data)
}

/// 8-bit RGB PNG
pub fn png_rgb(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    encode(width, height, png::ColorType::Rgb, None, data)
}

/// 8-bit indexed PNG
pub fn png_indexed(width: u32, height: u32, palette: &[[u8; 3]], indices: &[u8]) -> Vec<u8> {
    let plte: Vec<u8> = palette.iter().flatten().copied().collect();
    encode(width, height, png::ColorType::Indexed, Some(&plte), indices)
}

/// Interleaved RGB bytes of a diagonal color gradient
pub fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1).max(1)) as u8;
            let g = (y * 255 / (height - 1).max(1)) as u8;
            let b = 255 - r / 2 - g / 2;
            data.extend_from_slice(&[r, g, b]);
        }
    }
    data
}

/// Gradient PNG written into `dir`
pub fn write_gradient_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, png_rgb(width, height, &gradient_rgb(width, height))).expect("write PNG");
    path
}

/// Config YAML written into `dir`
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, yaml).expect("write config");
    path
}
