//! Color distance metrics.
//!
//! All metrics take colors as `[f64; 3]` so that perturbed values from
//! ordered dithering and error diffusion can be compared without rounding.

use std::fmt;
use std::str::FromStr;

/// CCIR 601 luminance weights for red, green and blue.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Scale of the channel term relative to the luminance term.
const PSYCHOVISUAL_CHROMA_SCALE: f64 = 0.75;

/// Error returned for an invalid metric name or norm order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// Norm order below 1 or not a number
    #[error("norm order must be at least 1, got {0}")]
    InvalidOrder(f64),
    /// Name that is neither a known metric nor a number
    #[error(
        "unknown distance metric {0:?}, expected euclidean, manhattan, chebyshev, psychovisual or a norm order"
    )]
    Unknown(String),
}

/// How the distance between two colors is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMetric {
    /// Minkowski p-norm of the channel difference.
    ///
    /// `order = 2` is Euclidean, `1` is Manhattan and `f64::INFINITY` the
    /// largest channel difference (Chebyshev).
    Norm {
        /// The `p` of the norm, at least 1.
        order: f64,
    },

    /// Luminance-weighted distance (CCIR 601).
    ///
    /// ```text
    /// d = 0.75 * sum(w_k * (dc_k / 255)^2) + (luma_1 - luma_2)^2
    /// luma = dot(c, w) / 255,  w = (0.299, 0.587, 0.114)
    /// ```
    ///
    /// Inputs are expected on the `0..=255` scale.
    Psychovisual,
}

impl Default for DistanceMetric {
    fn default() -> Self {
        Self::EUCLIDEAN
    }
}

impl DistanceMetric {
    /// Euclidean (L2) distance.
    pub const EUCLIDEAN: Self = Self::Norm { order: 2.0 };
    /// Manhattan (L1) distance.
    pub const MANHATTAN: Self = Self::Norm { order: 1.0 };
    /// Largest per-channel difference.
    pub const CHEBYSHEV: Self = Self::Norm {
        order: f64::INFINITY,
    };

    /// A p-norm metric, validated.
    pub fn norm(order: f64) -> Result<Self, MetricError> {
        if order.is_nan() || order < 1.0 {
            return Err(MetricError::InvalidOrder(order));
        }
        Ok(Self::Norm { order })
    }

    /// Distance between two colors.
    pub fn distance(&self, a: [f64; 3], b: [f64; 3]) -> f64 {
        match *self {
            Self::Norm { order } => norm_distance(a, b, order),
            Self::Psychovisual => psychovisual_distance(a, b),
        }
    }

    /// True for [`DistanceMetric::Psychovisual`].
    #[inline]
    pub fn is_psychovisual(&self) -> bool {
        matches!(self, Self::Psychovisual)
    }
}

fn norm_distance(a: [f64; 3], b: [f64; 3], order: f64) -> f64 {
    let d = [(a[0] - b[0]).abs(), (a[1] - b[1]).abs(), (a[2] - b[2]).abs()];
    if order == 2.0 {
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    } else if order == 1.0 {
        d[0] + d[1] + d[2]
    } else if order.is_infinite() {
        d[0].max(d[1]).max(d[2])
    } else {
        // Scaled by the largest difference so large orders cannot overflow
        let max = d[0].max(d[1]).max(d[2]);
        if max == 0.0 {
            return 0.0;
        }
        let sum: f64 = d.iter().map(|v| (v / max).powf(order)).sum();
        max * sum.powf(order.recip())
    }
}

fn psychovisual_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let luma = |c: [f64; 3]| {
        (c[0] * LUMA_WEIGHTS[0] + c[1] * LUMA_WEIGHTS[1] + c[2] * LUMA_WEIGHTS[2]) / 255.0
    };
    let chroma: f64 = (0..3)
        .map(|k| {
            let diff = (a[k] - b[k]) / 255.0;
            diff * diff * LUMA_WEIGHTS[k]
        })
        .sum();
    let luma_diff = luma(a) - luma(b);
    chroma * PSYCHOVISUAL_CHROMA_SCALE + luma_diff * luma_diff
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Psychovisual => write!(f, "psychovisual"),
            Self::Norm { order } if order == 2.0 => write!(f, "euclidean"),
            Self::Norm { order } if order == 1.0 => write!(f, "manhattan"),
            Self::Norm { order } if order.is_infinite() => write!(f, "chebyshev"),
            Self::Norm { order } => write!(f, "{order}"),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::EUCLIDEAN),
            "manhattan" | "l1" => Ok(Self::MANHATTAN),
            "chebyshev" | "max" | "inf" => Ok(Self::CHEBYSHEV),
            "psychovisual" | "ccir601" => Ok(Self::Psychovisual),
            other => match other.parse::<f64>() {
                Ok(order) => Self::norm(order),
                Err(_) => Err(MetricError::Unknown(s.to_string())),
            },
        }
    }
}
