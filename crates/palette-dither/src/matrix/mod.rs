//! Threshold matrices for ordered dithering.
//!
//! A [`ThresholdMatrix`] stores a rank permutation of `0..width*height`
//! laid out row-major, plus the offset and divisor that turn a rank into
//! a threshold factor. Ordered ditherers tile the matrix over the image:
//! pixel `(x, y)` reads rank `(x mod width, y mod height)`.
//!
//! | Constructor | Ranks | Factor |
//! |-------------|-------|--------|
//! | [`ThresholdMatrix::bayer`] | Bayer `I(n)` | `(1 + I) / (1 + n²)`, in `(0, 1]` |
//! | [`ThresholdMatrix::bayer_mixing`] | transposed Bayer | `I / n²`, in `[0, 1)` |
//! | [`ThresholdMatrix::cluster_dot`] | cluster-dot table | `rank / cells`, in `[0, 1)` |

mod bayer;
mod cluster;

use std::fmt;
use std::str::FromStr;

pub use bayer::{bayer_index, BAYER_MAX_ORDER};
pub use cluster::CLUSTER_DOT_ORDERS;

/// Error type for matrix construction and order parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// No matrix of this family exists at the requested order
    #[error("unsupported {kind} matrix order {order}, supported orders: {supported}")]
    UnsupportedOrder {
        /// Matrix family
        kind: &'static str,
        /// Requested order
        order: MatrixOrder,
        /// Human readable list of valid orders
        supported: String,
    },
    /// Order string that is neither `N` nor `WxH`
    #[error("invalid matrix order {input:?}, expected N or WxH")]
    ParseOrder {
        /// The rejected input
        input: String,
    },
}

/// Size of a threshold matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixOrder {
    /// `n` by `n`
    Square(usize),
    /// `width` columns by `height` rows
    Rect {
        /// Columns
        width: usize,
        /// Rows
        height: usize,
    },
}

impl MatrixOrder {
    /// Columns.
    pub fn width(&self) -> usize {
        match *self {
            Self::Square(n) => n,
            Self::Rect { width, .. } => width,
        }
    }

    /// Rows.
    pub fn height(&self) -> usize {
        match *self {
            Self::Square(n) => n,
            Self::Rect { height, .. } => height,
        }
    }

    /// Side length when the order is square, including `NxN` rectangles.
    pub fn side(&self) -> Option<usize> {
        match *self {
            Self::Square(n) => Some(n),
            Self::Rect { width, height } if width == height => Some(width),
            Self::Rect { .. } => None,
        }
    }
}

impl Default for MatrixOrder {
    fn default() -> Self {
        Self::Square(8)
    }
}

impl From<usize> for MatrixOrder {
    fn from(n: usize) -> Self {
        Self::Square(n)
    }
}

impl fmt::Display for MatrixOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square(n) => write!(f, "{n}"),
            Self::Rect { width, height } => write!(f, "{width}x{height}"),
        }
    }
}

impl FromStr for MatrixOrder {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MatrixError::ParseOrder {
            input: s.to_string(),
        };
        let trimmed = s.trim().to_ascii_lowercase();
        match trimmed.split_once('x') {
            Some((w, h)) => {
                let width = w.trim().parse().map_err(|_| err())?;
                let height = h.trim().parse().map_err(|_| err())?;
                Ok(Self::Rect { width, height })
            }
            None => trimmed.parse().map(Self::Square).map_err(|_| err()),
        }
    }
}

/// A tiled threshold matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMatrix {
    width: usize,
    height: usize,
    ranks: Vec<u32>,
    offset: f64,
    divisor: f64,
}

impl ThresholdMatrix {
    /// Matrix from raw ranks; `factor = (rank + offset) / divisor`.
    pub(crate) fn from_ranks(
        width: usize,
        height: usize,
        ranks: Vec<u32>,
        offset: f64,
        divisor: f64,
    ) -> Self {
        debug_assert_eq!(ranks.len(), width * height);
        Self {
            width,
            height,
            ranks,
            offset,
            divisor,
        }
    }

    /// Columns of the tile.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows of the tile.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn cells(&self) -> usize {
        self.ranks.len()
    }

    /// Raw ranks, row-major.
    #[inline]
    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    /// Rank at image pixel `(x, y)`, tiled.
    #[inline]
    pub fn rank(&self, x: usize, y: usize) -> u32 {
        self.ranks[(y % self.height) * self.width + x % self.width]
    }

    /// Threshold factor at image pixel `(x, y)`, tiled.
    #[inline]
    pub fn factor(&self, x: usize, y: usize) -> f64 {
        (self.rank(x, y) as f64 + self.offset) / self.divisor
    }

    /// Factors for one matrix row, used when printing.
    pub fn factor_row(&self, y: usize) -> Vec<f64> {
        (0..self.width).map(|x| self.factor(x, y)).collect()
    }

    /// Numerator/denominator form of the factor at `(x, y)`.
    pub fn fraction(&self, x: usize, y: usize) -> (u32, u32) {
        (
            self.rank(x, y) + self.offset as u32,
            self.divisor as u32,
        )
    }
}
