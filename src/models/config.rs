use crate::assets::AssetLoader;
use crate::error::RenderError;
use palette_dither::{
    DiffusionKernel, DistanceMetric, DitherOptions, DitherStrategy, MatrixOrder, Palette,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Named palettes as lists of hex colors
    #[serde(default)]
    pub palettes: HashMap<String, Vec<String>>,

    /// Named dithering profiles
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,

    /// Profile used when none is given on the command line
    #[serde(default = "default_profile")]
    pub default_profile: Option<String>,
}

fn default_profile() -> Option<String> {
    Some("default".to_string())
}

/// A YAML scalar that may be written as a number or a string
/// (`order: 8`, `order: 5x3`, `metric: 3`, `metric: psychovisual`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConfigValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A palette plus dithering settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProfileConfig {
    /// Name of an entry in `palettes`
    pub palette: String,

    /// Dithering strategy (default: error-diffusion)
    #[serde(default)]
    pub strategy: Option<String>,

    /// Error diffusion kernel (default: floyd-steinberg)
    #[serde(default)]
    pub kernel: Option<String>,

    /// Threshold matrix order, `N` or `WxH` (default: 8)
    #[serde(default)]
    pub order: Option<ConfigValue>,

    /// Distance metric name or norm order
    #[serde(default)]
    pub metric: Option<ConfigValue>,

    /// Ordered-dither thresholds per channel (default: 64, 64, 64)
    #[serde(default)]
    pub thresholds: Option<[f64; 3]>,
}

impl ProfileConfig {
    /// Profile using `palette` with every setting at its default.
    pub fn with_palette(palette: impl Into<String>) -> Self {
        Self {
            palette: palette.into(),
            strategy: None,
            kernel: None,
            order: None,
            metric: None,
            thresholds: None,
        }
    }

    /// Parse the textual settings into a strategy and options.
    pub fn dither_settings(&self) -> Result<(DitherStrategy, DitherOptions), RenderError> {
        let strategy = match self.strategy {
            Some(ref s) => s.parse::<DitherStrategy>()?,
            None => DitherStrategy::default(),
        };

        let mut options = DitherOptions::new();
        if let Some(ref k) = self.kernel {
            options = options.kernel(k.parse::<DiffusionKernel>()?);
        }
        if let Some(ref o) = self.order {
            let order: MatrixOrder = o
                .to_string()
                .parse()
                .map_err(palette_dither::DitherError::from)?;
            options = options.order(order);
        }
        if let Some(ref m) = self.metric {
            let metric: DistanceMetric = m
                .to_string()
                .parse()
                .map_err(palette_dither::DitherError::from)?;
            options = options.metric(metric);
        }
        if let Some(t) = self.thresholds {
            options = options.thresholds(t);
        }

        Ok((strategy, options))
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        palettes = config.palettes.len(),
                        profiles = config.profiles.len(),
                        source = %loader.config_source(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// The embedded default configuration
    pub fn default_embedded() -> Self {
        Self::load_from_assets(&AssetLoader::new(None))
    }

    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, RenderError> {
        serde_yaml::from_str(content).map_err(|e| RenderError::Config(e.to_string()))
    }

    /// Build the named palette
    pub fn palette(&self, name: &str) -> Result<Palette, RenderError> {
        let colors = self
            .palettes
            .get(name)
            .ok_or_else(|| RenderError::UnknownPalette(name.to_string()))?;
        Ok(Palette::from_hex(colors)?)
    }

    /// Look up a profile by name, or the default profile when `name` is `None`
    ///
    /// Returns `Ok(None)` only when no name is given and no default is set.
    pub fn profile(&self, name: Option<&str>) -> Result<Option<&ProfileConfig>, RenderError> {
        let Some(name) = name.or(self.default_profile.as_deref()) else {
            return Ok(None);
        };
        self.profiles
            .get(name)
            .map(Some)
            .ok_or_else(|| RenderError::UnknownProfile(name.to_string()))
    }

    /// Palette names in sorted order
    pub fn palette_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.palettes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Profile names in sorted order
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut palettes = HashMap::new();
        palettes.insert(
            "bw".to_string(),
            vec!["#000000".to_string(), "#FFFFFF".to_string()],
        );

        let mut profiles = HashMap::new();
        profiles.insert("default".to_string(), ProfileConfig::with_palette("bw"));

        Self {
            palettes,
            profiles,
            default_profile: Some("default".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.default_profile, Some("default".to_string()));
        let profile = config.profile(None).unwrap().unwrap();
        assert_eq!(profile.palette, "bw");
        assert_eq!(config.palette("bw").unwrap().len(), 2);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
palettes:
  duo: ["#000000", "#FF8800"]
profiles:
  poster:
    palette: duo
    strategy: cluster-dot
    order: 5x3
    thresholds: [32, 48, 64]
  smooth:
    palette: duo
    strategy: yliluoma
    order: 4
    metric: 3
default_profile: poster
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();

        let poster = config.profile(None).unwrap().unwrap();
        let (strategy, options) = poster.dither_settings().unwrap();
        assert_eq!(strategy, DitherStrategy::ClusterDot);
        assert_eq!(
            options.order,
            MatrixOrder::Rect {
                width: 5,
                height: 3
            }
        );
        assert_eq!(options.thresholds, [32.0, 48.0, 64.0]);

        let smooth = config.profile(Some("smooth")).unwrap().unwrap();
        let (strategy, options) = smooth.dither_settings().unwrap();
        assert_eq!(strategy, DitherStrategy::Yliluoma);
        assert_eq!(options.order, MatrixOrder::Square(4));
        assert_eq!(options.metric, Some(DistanceMetric::norm(3.0).unwrap()));
    }

    #[test]
    fn test_missing_default_profile_field_uses_default_name() {
        let config = AppConfig::from_yaml("palettes: {}\n").unwrap();
        assert_eq!(config.default_profile, Some("default".to_string()));
        assert!(matches!(
            config.profile(None),
            Err(RenderError::UnknownProfile(name)) if name == "default"
        ));
    }

    #[test]
    fn test_null_default_profile() {
        let config = AppConfig::from_yaml("default_profile: ~\n").unwrap();
        assert_eq!(config.profile(None).unwrap(), None);
    }

    #[test]
    fn test_unknown_palette() {
        let config = AppConfig::default();
        assert!(matches!(
            config.palette("sepia"),
            Err(RenderError::UnknownPalette(name)) if name == "sepia"
        ));
    }

    #[test]
    fn test_invalid_palette_color() {
        let mut config = AppConfig::default();
        config
            .palettes
            .insert("bad".to_string(), vec!["#zzzzzz".to_string()]);
        assert!(matches!(config.palette("bad"), Err(RenderError::Palette(_))));
    }

    #[test]
    fn test_invalid_settings() {
        let mut profile = ProfileConfig::with_palette("bw");
        profile.strategy = Some("spiral".to_string());
        assert!(matches!(
            profile.dither_settings(),
            Err(RenderError::Dither(_))
        ));

        let mut profile = ProfileConfig::with_palette("bw");
        profile.metric = Some(ConfigValue::Number(0.5));
        assert!(profile.dither_settings().is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            AppConfig::from_yaml("palettes: [unclosed"),
            Err(RenderError::Config(_))
        ));
    }

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::load_from_assets(&AssetLoader::new(None));
        for name in ["bw", "cga", "eink6", "yliluoma16"] {
            assert!(config.palette(name).is_ok(), "palette {name}");
        }
        assert_eq!(config.palette("yliluoma16").unwrap().len(), 16);
        for name in config.profile_names() {
            let profile = config.profile(Some(name)).unwrap().unwrap();
            assert!(profile.dither_settings().is_ok(), "profile {name}");
            assert!(config.palette(&profile.palette).is_ok(), "profile {name}");
        }
    }
}
