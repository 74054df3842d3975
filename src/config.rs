//! Application configuration: built-in defaults, then an optional
//! `inspections.toml`, then `INSPECTIONS__*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::status::DEFAULT_VALIDITY_MONTHS;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Loopback address of the local front end, e.g. "127.0.0.1:3000".
    pub addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub photos_dir: PathBuf,
    pub reports_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectionConfig {
    /// Months (of 30 days) an inspection stays current.
    pub validity_months: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    /// json, pretty, or anything else for the compact default
    pub format: String,
}

/// Presentation settings handed to the page layout.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub title: String,
    pub accent_color: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Equipment Inspections".to_string(),
            accent_color: "#00008b".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub inspection: InspectionConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("inspections").required(false))
            .add_source(Environment::with_prefix("INSPECTIONS").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Defaults only, ignoring files and environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let ui = UiConfig::default();
        Config::builder()
            .set_default("server.addr", "127.0.0.1:3000")?
            .set_default("storage.database_path", "inspections.sqlite3")?
            .set_default("storage.photos_dir", "inspection_photos")?
            .set_default("storage.reports_dir", "reports")?
            .set_default("inspection.validity_months", i64::from(DEFAULT_VALIDITY_MONTHS))?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            .set_default("ui.title", ui.title)?
            .set_default("ui.accent_color", ui.accent_color)
    }
}
