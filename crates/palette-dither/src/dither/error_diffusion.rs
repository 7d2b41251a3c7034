//! Error diffusion dithering.
//!
//! Each pixel's quantization error is carried to its unvisited neighbors,
//! so later decisions compensate for earlier ones. The scan is strictly
//! sequential.

use super::{dither_with_kernel, DiffusionKernel, Dither, DitherOptions};
use crate::image::RgbImage;
use crate::palette::Palette;

/// Error diffusion with a fixed kernel.
///
/// The kernel is chosen at construction; [`DitherOptions::kernel`] is
/// ignored here and only used by the builder to pick one.
///
/// # Example
///
/// ```
/// use palette_dither::{DiffusionKernel, Dither, DitherOptions, ErrorDiffusion, Palette, RgbImage};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// let image = RgbImage::from_gray(4, 4, &[64; 16]).unwrap();
/// let indices = ErrorDiffusion::new(DiffusionKernel::Atkinson)
///     .dither(&image, &palette, &DitherOptions::new());
/// assert_eq!(indices.len(), 16);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorDiffusion {
    kernel: DiffusionKernel,
}

impl ErrorDiffusion {
    /// Ditherer spreading error with `kernel`.
    pub fn new(kernel: DiffusionKernel) -> Self {
        Self { kernel }
    }

    /// The kernel in use.
    #[inline]
    pub fn kernel(&self) -> DiffusionKernel {
        self.kernel
    }
}

impl Dither for ErrorDiffusion {
    fn dither(&self, image: &RgbImage, palette: &Palette, options: &DitherOptions) -> Vec<u8> {
        dither_with_kernel(
            image,
            palette,
            self.kernel.kernel(),
            options.metric_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn bw() -> Palette {
        Palette::from_packed(&[0x000000, 0xFFFFFF]).unwrap()
    }

    #[test]
    fn test_floyd_steinberg_uniform_gray_checkerboard() {
        let image = RgbImage::filled(2, 2, Rgb::new(128, 128, 128)).unwrap();
        let out = ErrorDiffusion::new(DiffusionKernel::FloydSteinberg).dither(
            &image,
            &bw(),
            &DitherOptions::new(),
        );
        assert_eq!(out, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_average_tone_is_preserved() {
        let size = 32;
        let total = size * size;
        for kernel in DiffusionKernel::ALL {
            for level in [64u8, 128, 192] {
                let image = RgbImage::from_gray(size, size, &vec![level; total]).unwrap();
                let out = ErrorDiffusion::new(kernel).dither(&image, &bw(), &DitherOptions::new());
                let white = out.iter().filter(|&&i| i == 1).count() as f64 / total as f64;
                let expected = level as f64 / 255.0;
                assert!(
                    (white - expected).abs() < 0.08,
                    "{kernel} at level {level}: white ratio {white:.3}, expected ~{expected:.3}"
                );
            }
        }
    }

    #[test]
    fn test_palette_colors_pass_through() {
        // exact palette colors produce zero error and stay put
        let image = RgbImage::from_gray(3, 2, &[0, 255, 0, 255, 0, 255]).unwrap();
        for kernel in DiffusionKernel::ALL {
            let out = ErrorDiffusion::new(kernel).dither(&image, &bw(), &DitherOptions::new());
            assert_eq!(out, vec![0, 1, 0, 1, 0, 1], "{kernel}");
        }
    }

    #[test]
    fn test_negative_carry_clamps_to_black() {
        // carried error pushes the black pixels below zero
        let palette = Palette::from_packed(&[0x000000, 0x808080, 0xFFFFFF]).unwrap();
        let image = RgbImage::from_gray(4, 1, &[250, 0, 0, 0]).unwrap();
        let out = ErrorDiffusion::new(DiffusionKernel::FloydSteinberg).dither(
            &image,
            &palette,
            &DitherOptions::new(),
        );
        assert_eq!(out, vec![2, 0, 0, 0]);
    }
}
