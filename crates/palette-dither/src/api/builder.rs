//! Ditherer builder -- the primary ergonomic entry point for the crate.
//!
//! [`Ditherer`] owns a palette and a configuration and can be reused
//! across images.

use crate::color::DistanceMetric;
use crate::dither::{
    DiffusionKernel, Dither, DitherOptions, DitherStrategy, ErrorDiffusion, NearestColor,
    OrderedDither, Yliluoma,
};
use crate::image::RgbImage;
use crate::matrix::{MatrixError, MatrixOrder};
use crate::output::IndexedImage;
use crate::palette::Palette;

use super::DitherError;

/// High-level dithering builder.
///
/// # Design
///
/// - Constructor requires [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`dither()`](Self::dither) takes `&self` so the builder is reusable
///   across multiple images
/// - Matrix orders are validated on each call, before any pixel is read
///
/// # Example
///
/// ```
/// use palette_dither::{DitherStrategy, Ditherer, Palette, RgbImage};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// let ditherer = Ditherer::new(palette)
///     .strategy(DitherStrategy::Bayer)
///     .order(4);
///
/// let image = RgbImage::from_gray(2, 2, &[128; 4]).unwrap();
/// let result = ditherer.dither(&image).unwrap();
///
/// assert_eq!(result.width(), 2);
/// assert_eq!(result.height(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer {
    palette: Palette,
    strategy: DitherStrategy,
    options: DitherOptions,
}

impl Ditherer {
    /// Create a new ditherer with the given palette.
    ///
    /// Defaults: Floyd-Steinberg error diffusion, order 8, thresholds 64.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            strategy: DitherStrategy::default(),
            options: DitherOptions::default(),
        }
    }

    /// Set the dithering strategy.
    #[inline]
    pub fn strategy(mut self, strategy: DitherStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the error diffusion kernel.
    #[inline]
    pub fn kernel(mut self, kernel: DiffusionKernel) -> Self {
        self.options = self.options.kernel(kernel);
        self
    }

    /// Set the threshold matrix order.
    #[inline]
    pub fn order(mut self, order: impl Into<MatrixOrder>) -> Self {
        self.options = self.options.order(order);
        self
    }

    /// Set the distance metric.
    ///
    /// This overrides the per-strategy default (psychovisual for Yliluoma,
    /// Euclidean otherwise).
    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.options = self.options.metric(metric);
        self
    }

    /// Set the ordered-dither thresholds.
    #[inline]
    pub fn thresholds(mut self, thresholds: [f64; 3]) -> Self {
        self.options = self.options.thresholds(thresholds);
        self
    }

    /// Replace all options at once.
    #[inline]
    pub fn options(mut self, options: DitherOptions) -> Self {
        self.options = options;
        self
    }

    /// The palette every call dithers onto.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Strategy the next `dither` call will use.
    #[inline]
    pub fn current_strategy(&self) -> DitherStrategy {
        self.strategy
    }

    /// Options the next `dither` call will use.
    #[inline]
    pub fn current_options(&self) -> &DitherOptions {
        &self.options
    }

    /// Dither an image.
    ///
    /// # Errors
    ///
    /// [`DitherError::Matrix`] when the configured order is not supported
    /// by an ordered strategy.
    pub fn dither(&self, image: &RgbImage) -> Result<IndexedImage, DitherError> {
        let ditherer = self.build()?;
        tracing::debug!(
            strategy = %self.strategy,
            width = image.width(),
            height = image.height(),
            colors = self.palette.len(),
            "Dithering image"
        );
        let indices = ditherer.dither(image, &self.palette, &self.options);
        Ok(IndexedImage::new(
            indices,
            image.width(),
            image.height(),
            self.palette.clone(),
        ))
    }

    /// Instantiate the algorithm for the current strategy.
    fn build(&self) -> Result<Box<dyn Dither + Send + Sync>, DitherError> {
        let order = self.options.order;
        let square = || {
            order.side().ok_or_else(|| MatrixError::UnsupportedOrder {
                kind: if self.strategy == DitherStrategy::Yliluoma {
                    "yliluoma"
                } else {
                    "bayer"
                },
                order,
                supported: "square orders only".to_string(),
            })
        };

        let ditherer: Box<dyn Dither + Send + Sync> = match self.strategy {
            DitherStrategy::Nearest => Box::new(NearestColor),
            DitherStrategy::ErrorDiffusion => Box::new(ErrorDiffusion::new(self.options.kernel)),
            DitherStrategy::Bayer => Box::new(OrderedDither::bayer(square()?)?),
            DitherStrategy::ClusterDot => Box::new(OrderedDither::cluster_dot(order)?),
            DitherStrategy::Yliluoma => Box::new(Yliluoma::new(square()?)?),
        };
        Ok(ditherer)
    }
}
