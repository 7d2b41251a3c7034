//! Median-cut palette construction.
//!
//! Pixels start in one bucket. Each round splits every bucket at the
//! median of one channel until the requested number of buckets exists,
//! then each bucket contributes its rounded mean color.

use super::error::PaletteError;
use super::palette::{Palette, MAX_COLORS};
use crate::color::Rgb;
use crate::image::RgbImage;

impl Palette {
    /// Build an `n` color palette from `image` by median cut.
    ///
    /// `channel` fixes the split channel (0 = red, 1 = green, 2 = blue);
    /// `None` splits each bucket along its widest channel. A bucket that
    /// cannot be split (one pixel, or every pixel equal on the split
    /// channel) is carried into both halves, so the result always has
    /// exactly `n` entries. Deterministic for a given input.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::InvalidColorCount`] unless `1 <= n <= 256`
    /// - [`PaletteError::InvalidChannel`] for a channel outside `0..3`
    ///
    /// # Example
    ///
    /// ```
    /// use palette_dither::{Palette, Rgb, RgbImage};
    ///
    /// let image = RgbImage::from_gray(4, 1, &[0, 10, 240, 250]).unwrap();
    /// let palette = Palette::median_cut(&image, 2, None).unwrap();
    /// assert_eq!(palette.colors(), &[Rgb::new(5, 5, 5), Rgb::new(245, 245, 245)]);
    /// ```
    pub fn median_cut(
        image: &RgbImage,
        n: usize,
        channel: Option<usize>,
    ) -> Result<Self, PaletteError> {
        if n == 0 || n > MAX_COLORS {
            return Err(PaletteError::InvalidColorCount { requested: n });
        }
        if let Some(channel) = channel {
            if channel > 2 {
                return Err(PaletteError::InvalidChannel { channel });
            }
        }

        let mut buckets: Vec<Vec<Rgb>> = vec![image.pixels().to_vec()];
        while buckets.len() < n {
            let total = buckets.len();
            let mut next = Vec::with_capacity(n);
            for (i, bucket) in buckets.into_iter().enumerate() {
                let remaining = total - i - 1;
                if next.len() + 2 + remaining > n {
                    next.push(bucket);
                    continue;
                }
                let (low, high) = split_bucket(bucket, channel);
                next.push(low);
                next.push(high);
            }
            buckets = next;
        }

        let colors: Vec<Rgb> = buckets.iter().map(|b| mean_color(b)).collect();
        tracing::debug!(
            colors = colors.len(),
            pixels = image.pixels().len(),
            "Median cut palette built"
        );
        Self::new(&colors)
    }
}

/// Channel with the largest value range; ties go to the lower channel.
fn widest_channel(pixels: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_range = 0;
    for c in 0..3 {
        let values = pixels.iter().map(|p| p.to_bytes()[c]);
        let (min, max) = values.fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let range = max.saturating_sub(min);
        if range > best_range {
            best_range = range;
            best = c;
        }
    }
    best
}

/// Split at the median: values below it go low, the rest go high.
fn split_bucket(mut pixels: Vec<Rgb>, channel: Option<usize>) -> (Vec<Rgb>, Vec<Rgb>) {
    if pixels.len() < 2 {
        return (pixels.clone(), pixels);
    }
    let c = channel.unwrap_or_else(|| widest_channel(&pixels));
    pixels.sort_by_key(|p| p.to_bytes()[c]);

    let mid = pixels.len() / 2;
    let median = if pixels.len() % 2 == 0 {
        (pixels[mid - 1].to_bytes()[c] as f64 + pixels[mid].to_bytes()[c] as f64) / 2.0
    } else {
        pixels[mid].to_bytes()[c] as f64
    };
    let cut = pixels.partition_point(|p| (p.to_bytes()[c] as f64) < median);

    if cut == 0 || cut == pixels.len() {
        return (pixels.clone(), pixels);
    }
    let high = pixels.split_off(cut);
    (pixels, high)
}

fn mean_color(pixels: &[Rgb]) -> Rgb {
    let mut sum = [0u64; 3];
    for p in pixels {
        for (s, v) in sum.iter_mut().zip(p.to_bytes()) {
            *s += v as u64;
        }
    }
    let n = pixels.len().max(1) as f64;
    Rgb::from_f64([sum[0] as f64 / n, sum[1] as f64 / n, sum[2] as f64 / n])
}
