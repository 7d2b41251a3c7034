//! Palette struct with closest-color matching.
//!
//! A [`Palette`] is an ordered, immutable list of colors. Indices into it
//! are emitted as `u8`, so a palette holds between 1 and 256 entries.
//! Duplicate entries are kept as given.

use rayon::prelude::*;

use super::error::PaletteError;
use crate::color::{DistanceMetric, Rgb};
use crate::image::RgbImage;

/// Largest palette an index byte can address.
pub const MAX_COLORS: usize = 256;

/// Something that may carry its own discrete palette, such as an indexed
/// image.
pub trait PaletteSource {
    /// The attached colors, or `None` for true-color sources.
    fn attached_palette(&self) -> Option<&[Rgb]>;

    /// Short description used in error messages.
    fn source_kind(&self) -> String;
}

/// An ordered, immutable list of colors.
///
/// Channel values are precomputed as `f64` at construction so that
/// per-pixel distance queries do no conversion work.
///
/// # Example
///
/// ```
/// use palette_dither::{DistanceMetric, Palette};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.closest_index([200.0, 200.0, 200.0], DistanceMetric::EUCLIDEAN), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    values: Vec<[f64; 3]>,
}

impl Palette {
    /// Create a palette from colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::Empty`] when `colors` is empty
    /// - [`PaletteError::TooManyColors`] above [`MAX_COLORS`]
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        if colors.len() > MAX_COLORS {
            return Err(PaletteError::TooManyColors { len: colors.len() });
        }
        Ok(Self {
            colors: colors.to_vec(),
            values: colors.iter().map(|c| c.to_f64()).collect(),
        })
    }

    /// Create a palette from hex strings such as `"#ff8800"` or `"0xff8800"`.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.as_ref()
                    .parse::<Rgb>()
                    .map_err(|error| PaletteError::ParseColor { index, error })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// Create a palette from packed `0xRRGGBB` integers.
    pub fn from_packed(packed: &[u32]) -> Result<Self, PaletteError> {
        let colors = packed
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Rgb::from_packed(value).map_err(|error| PaletteError::ParseColor { index, error })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// Create a palette from rows of `[r, g, b]`.
    pub fn from_rows(rows: &[[u8; 3]]) -> Result<Self, PaletteError> {
        let colors: Vec<Rgb> = rows.iter().copied().map(Rgb::from_bytes).collect();
        Self::new(&colors)
    }

    /// Create a palette from a flat `[r, g, b, r, g, b, ...]` buffer, the
    /// layout of a PNG `PLTE` chunk.
    pub fn from_flat(flat: &[u8]) -> Result<Self, PaletteError> {
        if flat.len() % 3 != 0 {
            return Err(PaletteError::InvalidFlatLength { len: flat.len() });
        }
        let colors: Vec<Rgb> = flat
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(&colors)
    }

    /// Take the palette attached to an indexed source.
    ///
    /// # Errors
    ///
    /// [`PaletteError::NoAttachedPalette`] when the source is true-color.
    pub fn from_indexed_source<S: PaletteSource + ?Sized>(source: &S) -> Result<Self, PaletteError> {
        match source.attached_palette() {
            Some(colors) => Self::new(colors),
            None => Err(PaletteError::NoAttachedPalette {
                kind: source.source_kind(),
            }),
        }
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; an empty palette cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors in order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at `index`.
    pub fn get(&self, index: usize) -> Result<Rgb, PaletteError> {
        self.colors
            .get(index)
            .copied()
            .ok_or(PaletteError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Channel values of entry `index` as `f64`. Panics when out of range.
    #[inline]
    pub(crate) fn value(&self, index: usize) -> [f64; 3] {
        self.values[index]
    }

    /// Distance from `color` to every entry, in palette order.
    pub fn distances(&self, color: [f64; 3], metric: DistanceMetric) -> Vec<f64> {
        self.values
            .iter()
            .map(|&v| metric.distance(color, v))
            .collect()
    }

    /// Index of the entry closest to `color`.
    ///
    /// Ties go to the lowest index.
    pub fn closest_index(&self, color: [f64; 3], metric: DistanceMetric) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, &v) in self.values.iter().enumerate() {
            let dist = metric.distance(color, v);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    /// Closest entry to an 8-bit color.
    pub fn closest_color(&self, color: Rgb, metric: DistanceMetric) -> Rgb {
        self.colors[self.closest_index(color.to_f64(), metric)]
    }

    /// Closest palette index for every pixel of `image`, row-major.
    pub fn closest_indices(&self, image: &RgbImage, metric: DistanceMetric) -> Vec<u8> {
        image
            .pixels()
            .par_iter()
            .map(|p| self.closest_index(p.to_f64(), metric) as u8)
            .collect()
    }

    /// Map indices back to colors.
    ///
    /// # Errors
    ///
    /// [`PaletteError::IndexOutOfRange`] for the first index past the end.
    pub fn render(&self, indices: &[u8]) -> Result<Vec<Rgb>, PaletteError> {
        indices.iter().map(|&i| self.get(i as usize)).collect()
    }

    /// Colors as packed `0xRRGGBB` integers.
    pub fn to_packed(&self) -> Vec<u32> {
        self.colors.iter().map(|c| c.to_packed()).collect()
    }

    /// Colors as `#rrggbb` strings.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_string()).collect()
    }

    /// Colors as a flat `[r, g, b, ...]` buffer.
    pub fn to_flat(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_bytes()).collect()
    }
}

impl TryFrom<&[Rgb]> for Palette {
    type Error = PaletteError;

    fn try_from(colors: &[Rgb]) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl std::str::FromStr for Palette {
    type Err = PaletteError;

    /// Parse a comma or whitespace separated list of hex colors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entries: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|e| !e.is_empty())
            .collect();
        Self::from_hex(&entries)
    }
}
