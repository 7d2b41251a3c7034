pub mod config;

pub use config::{AppConfig, ConfigValue, ProfileConfig};
