//! Dithering options and configuration.
//!
//! This module provides the [`DitherOptions`] struct shared by every
//! strategy. Each strategy reads only the fields it needs.

use super::DiffusionKernel;
use crate::color::DistanceMetric;
use crate::matrix::MatrixOrder;

/// Default per-channel amplitude of the ordered-dither perturbation.
pub const DEFAULT_THRESHOLDS: [f64; 3] = [64.0, 64.0, 64.0];

/// Configuration options for dithering.
///
/// | Field | Used by |
/// |-------|---------|
/// | `kernel` | error diffusion |
/// | `order` | Bayer, cluster-dot, Yliluoma |
/// | `metric` | all |
/// | `thresholds` | Bayer, cluster-dot |
///
/// # Example
///
/// ```
/// use palette_dither::{DiffusionKernel, DistanceMetric, DitherOptions};
///
/// let options = DitherOptions::new()
///     .kernel(DiffusionKernel::Atkinson)
///     .metric(DistanceMetric::MANHATTAN)
///     .thresholds([32.0, 32.0, 32.0]);
/// assert_eq!(options.kernel, DiffusionKernel::Atkinson);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Error diffusion kernel.
    ///
    /// Default: Floyd-Steinberg
    pub kernel: DiffusionKernel,

    /// Threshold matrix order.
    ///
    /// Default: `8`
    pub order: MatrixOrder,

    /// Color distance metric.
    ///
    /// `None` selects the strategy's own default: psychovisual for
    /// Yliluoma, Euclidean for everything else.
    pub metric: Option<DistanceMetric>,

    /// Per-channel amplitude added to a pixel before the closest-color
    /// lookup, scaled by the matrix factor.
    ///
    /// Default: `[64, 64, 64]`
    pub thresholds: [f64; 3],
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            kernel: DiffusionKernel::default(),
            order: MatrixOrder::default(),
            metric: None,
            thresholds: DEFAULT_THRESHOLDS,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffusion kernel.
    #[inline]
    pub fn kernel(mut self, kernel: DiffusionKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the matrix order.
    #[inline]
    pub fn order(mut self, order: impl Into<MatrixOrder>) -> Self {
        self.order = order.into();
        self
    }

    /// Set the distance metric.
    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the ordered-dither thresholds.
    #[inline]
    pub fn thresholds(mut self, thresholds: [f64; 3]) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// The configured metric, or Euclidean.
    #[inline]
    pub fn metric_or_default(&self) -> DistanceMetric {
        self.metric.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = DitherOptions::default();
        assert_eq!(opts.kernel, DiffusionKernel::FloydSteinberg);
        assert_eq!(opts.order, MatrixOrder::Square(8));
        assert_eq!(opts.metric, None, "metric should default to the strategy's choice");
        assert_eq!(opts.thresholds, [64.0; 3]);
        assert_eq!(opts.metric_or_default(), DistanceMetric::EUCLIDEAN);
    }

    #[test]
    fn test_builder_chain() {
        let opts = DitherOptions::new()
            .kernel(DiffusionKernel::Stucki)
            .order(4)
            .metric(DistanceMetric::Psychovisual)
            .thresholds([10.0, 20.0, 30.0]);
        assert_eq!(opts.kernel, DiffusionKernel::Stucki);
        assert_eq!(opts.order, MatrixOrder::Square(4));
        assert_eq!(opts.metric, Some(DistanceMetric::Psychovisual));
        assert_eq!(opts.thresholds, [10.0, 20.0, 30.0]);
    }
}
