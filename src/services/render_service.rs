use crate::error::RenderError;
use crate::models::{AppConfig, ProfileConfig};
use crate::rendering::{decode_png, encode_indexed_png, optimize_png, DecodedImage};
use palette_dither::{
    DiffusionKernel, DistanceMetric, DitherOptions, DitherStrategy, Ditherer, IndexedImage,
    MatrixOrder, Palette,
};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Command line overrides for one render
///
/// Every `None` falls back to the selected profile.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub profile: Option<String>,
    pub strategy: Option<DitherStrategy>,
    pub kernel: Option<DiffusionKernel>,
    pub order: Option<MatrixOrder>,
    pub metric: Option<DistanceMetric>,
    pub thresholds: Option<[f64; 3]>,
    /// Comma separated hex colors
    pub colors: Option<String>,
    /// Build the palette by median cut with this many colors
    pub median_cut: Option<usize>,
    /// Use the PLTE of an indexed input
    pub from_input: bool,
    /// Re-compress the output with oxipng
    pub optimize: bool,
}

/// Result of a render
#[derive(Debug)]
pub struct RenderOutput {
    pub png: Vec<u8>,
    pub image: IndexedImage,
    pub strategy: DitherStrategy,
}

/// Decode, resolve palette and settings, dither, encode
pub struct RenderService {
    config: AppConfig,
}

impl RenderService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render PNG bytes to an indexed PNG
    pub fn render_png(
        &self,
        input: &[u8],
        request: &RenderRequest,
    ) -> Result<RenderOutput, RenderError> {
        let start = Instant::now();
        let decoded = decode_png(input)?;
        let profile = self.config.profile(request.profile.as_deref())?;
        let palette = self.resolve_palette(request, profile, &decoded)?;
        let (strategy, options) = self.resolve_settings(request, profile)?;

        tracing::info!(
            width = decoded.image.width(),
            height = decoded.image.height(),
            strategy = %strategy,
            colors = palette.len(),
            "Dithering"
        );

        let image = Ditherer::new(palette)
            .strategy(strategy)
            .options(options)
            .dither(&decoded.image)?;

        let mut png = encode_indexed_png(&image)?;
        if request.optimize {
            png = optimize_png(png);
        }

        tracing::info!(
            bytes = png.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered"
        );

        Ok(RenderOutput {
            png,
            image,
            strategy,
        })
    }

    /// Render `input` to `output`
    pub fn render_file(
        &self,
        input: &Path,
        output: &Path,
        request: &RenderRequest,
    ) -> Result<RenderOutput, RenderError> {
        tracing::debug!(input = %input.display(), "Reading input");
        let data = fs::read(input)?;
        let result = self.render_png(&data, request)?;
        fs::write(output, &result.png)?;
        tracing::info!(output = %output.display(), "Wrote PNG");
        Ok(result)
    }

    /// Palette of an input PNG: median cut when `colors` is given, the
    /// attached PLTE otherwise
    pub fn extract_palette(
        &self,
        input: &[u8],
        colors: Option<usize>,
    ) -> Result<Palette, RenderError> {
        let decoded = decode_png(input)?;
        match colors {
            Some(n) => Ok(Palette::median_cut(&decoded.image, n, None)?),
            None => Ok(Palette::from_indexed_source(&decoded)?),
        }
    }

    /// Palette resolution order: `--colors`, `--median-cut`, `--from-input`,
    /// then the profile palette
    fn resolve_palette(
        &self,
        request: &RenderRequest,
        profile: Option<&ProfileConfig>,
        decoded: &DecodedImage,
    ) -> Result<Palette, RenderError> {
        if let Some(ref colors) = request.colors {
            tracing::debug!(%colors, "Palette from command line");
            return Ok(colors.parse::<Palette>()?);
        }
        if let Some(n) = request.median_cut {
            tracing::debug!(colors = n, "Palette by median cut");
            return Ok(Palette::median_cut(&decoded.image, n, None)?);
        }
        if request.from_input {
            tracing::debug!("Palette from input PLTE");
            return Ok(Palette::from_indexed_source(decoded)?);
        }
        match profile {
            Some(profile) => {
                tracing::debug!(palette = %profile.palette, "Palette from profile");
                self.config.palette(&profile.palette)
            }
            None => Err(RenderError::Config(
                "no palette given and no default profile configured".to_string(),
            )),
        }
    }

    /// Profile settings with command line overrides applied
    fn resolve_settings(
        &self,
        request: &RenderRequest,
        profile: Option<&ProfileConfig>,
    ) -> Result<(DitherStrategy, DitherOptions), RenderError> {
        let (mut strategy, mut options) = match profile {
            Some(profile) => profile.dither_settings()?,
            None => (DitherStrategy::default(), DitherOptions::default()),
        };

        if let Some(s) = request.strategy {
            strategy = s;
        }
        if let Some(k) = request.kernel {
            options = options.kernel(k);
        }
        if let Some(o) = request.order {
            options = options.order(o);
        }
        if let Some(m) = request.metric {
            options = options.metric(m);
        }
        if let Some(t) = request.thresholds {
            options = options.thresholds(t);
        }

        Ok((strategy, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn service() -> RenderService {
        let yaml = r##"
palettes:
  bw: ["#000000", "#FFFFFF"]
  rgb: ["#FF0000", "#00FF00", "#0000FF"]
profiles:
  plain:
    palette: bw
  ordered:
    palette: rgb
    strategy: bayer
    order: 4
    thresholds: [10, 10, 10]
default_profile: plain
"##;
        RenderService::new(AppConfig::from_yaml(yaml).unwrap())
    }

    #[test]
    fn test_settings_from_profile() {
        let svc = service();
        let profile = svc.config().profile(Some("ordered")).unwrap();
        let (strategy, options) = svc
            .resolve_settings(&RenderRequest::default(), profile)
            .unwrap();
        assert_eq!(strategy, DitherStrategy::Bayer);
        assert_eq!(options.order, MatrixOrder::Square(4));
        assert_eq!(options.thresholds, [10.0; 3]);
    }

    #[test]
    fn test_request_overrides_profile() {
        let svc = service();
        let profile = svc.config().profile(Some("ordered")).unwrap();
        let request = RenderRequest {
            strategy: Some(DitherStrategy::Nearest),
            order: Some(MatrixOrder::Square(2)),
            metric: Some(DistanceMetric::MANHATTAN),
            ..Default::default()
        };
        let (strategy, options) = svc.resolve_settings(&request, profile).unwrap();
        assert_eq!(strategy, DitherStrategy::Nearest);
        assert_eq!(options.order, MatrixOrder::Square(2));
        assert_eq!(options.metric, Some(DistanceMetric::MANHATTAN));
        assert_eq!(options.thresholds, [10.0; 3]);
    }

    fn gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&vec![value; (width * height) as usize])
                .unwrap();
        }
        buf
    }

    #[test]
    fn test_unknown_profile() {
        let request = RenderRequest {
            profile: Some("missing".to_string()),
            ..Default::default()
        };
        let err = service().render_png(&gray_png(2, 2, 0), &request).unwrap_err();
        assert!(matches!(err, RenderError::UnknownProfile(name) if name == "missing"));
    }

    #[test]
    fn test_colors_win_over_median_cut() {
        let request = RenderRequest {
            colors: Some("#000000, #808080".to_string()),
            median_cut: Some(4),
            strategy: Some(DitherStrategy::Nearest),
            ..Default::default()
        };
        let out = service().render_png(&gray_png(2, 2, 120), &request).unwrap();
        assert_eq!(out.image.palette().len(), 2);
        assert_eq!(out.image.indices(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_from_input_needs_indexed_png() {
        let request = RenderRequest {
            from_input: true,
            ..Default::default()
        };
        let err = service().render_png(&gray_png(2, 2, 0), &request).unwrap_err();
        assert_eq!(err.to_string(), "Palette error: Grayscale PNG has no attached palette");
    }

    #[test]
    fn test_default_profile_palette() {
        let out = service()
            .render_png(&gray_png(4, 4, 255), &RenderRequest::default())
            .unwrap();
        assert_eq!(out.strategy, DitherStrategy::ErrorDiffusion);
        assert_eq!(out.image.palette(), &service().config().palette("bw").unwrap());
        assert!(out.image.indices().iter().all(|&i| i == 1));
    }
}
