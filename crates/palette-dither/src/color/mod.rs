//! Color types and distance metrics
//!
//! This module provides the 8-bit [`Rgb`] color used throughout the crate
//! and the [`DistanceMetric`] that decides which palette entry is "closest".
//!
//! # Example
//!
//! ```
//! use palette_dither::{DistanceMetric, Rgb};
//!
//! let a: Rgb = "#abcdef".parse().unwrap();
//! assert_eq!(a, Rgb::new(171, 205, 239));
//! assert_eq!(a.to_packed(), 0xABCDEF);
//!
//! let d = DistanceMetric::EUCLIDEAN.distance([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]);
//! assert_eq!(d, 5.0);
//! ```

mod metric;
mod rgb;

pub use metric::{DistanceMetric, MetricError};
pub use rgb::Rgb;
