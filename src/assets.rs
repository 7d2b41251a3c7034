//! Configuration loading with an embedded fallback
//!
//! - If no external path is configured: use the embedded `config.yaml`
//! - If a path is configured and the file exists: use the file
//! - If a path is configured but missing: fall back to the embedded file

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Name of the embedded config file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable selecting an external config file.
pub const CONFIG_ENV_VAR: &str = "HITHER_CONFIG";

/// Where the active configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
    /// A path was configured but does not exist
    MissingFile(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::MissingFile(path) => write!(f, "embedded ({} not found)", path.display()),
        }
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Config loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from `--config` or `HITHER_CONFIG`)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `None` means the embedded config is used exclusively.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Loader for an explicit path, falling back to `HITHER_CONFIG`.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self::new(explicit.or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from)))
    }

    pub fn config_source(&self) -> ConfigSource {
        match self.config_file {
            Some(ref path) if path.exists() => ConfigSource::File(path.clone()),
            Some(ref path) => ConfigSource::MissingFile(path.clone()),
            None => ConfigSource::Embedded,
        }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to the embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::debug!(path = %path.display(), "Config file not found, using embedded");
        }

        embedded_config().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
        })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the embedded config to `target` (init command)
    ///
    /// Defaults to the configured path, then `./config.yaml`. Existing
    /// files are skipped unless `force` is set.
    pub fn init(&self, target: Option<&Path>, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = target
            .map(Path::to_path_buf)
            .or_else(|| self.config_file.clone())
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if let Some(data) = embedded_config() {
            fs::write(&path, &*data)?;
            tracing::info!(path = %path.display(), "Wrote default config");
            report.written.push(path.display().to_string());
        }

        Ok(report)
    }
}

fn embedded_config() -> Option<Cow<'static, [u8]>> {
    EmbeddedConfig::get(CONFIG_FILE_NAME).map(|f| {
        tracing::trace!("Loading config from embedded assets");
        f.data
    })
}
