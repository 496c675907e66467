//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the file named by `CYCLONE_CONFIG`) into
//! strongly-typed structs. Every table is optional; a missing file
//! yields the defaults so the service can start with no setup.
//! The resulting [`AppConfig`] is built once in `main` and passed down.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::risk::RiskThresholds;
use crate::types::Locale;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Env var overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "CYCLONE_CONFIG";

/// Env var overriding the configured locale.
pub const LOCALE_ENV: &str = "CYCLONE_LOCALE";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub locale: Locale,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
    pub risk: RiskThresholds,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every path other than the API.
    pub static_dir: PathBuf,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("frontend"),
            cors: true,
        }
    }
}

/// Open-Meteo endpoints and HTTP client behaviour.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    pub atmospheric_url: String,
    pub marine_url: String,
    pub connect_timeout_secs: u64,
    pub total_timeout_secs: u64,
    /// Disable only for local development behind an intercepting proxy.
    pub ssl_verify: bool,
    pub forecast_days: u8,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            atmospheric_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            marine_url: "https://marine-api.open-meteo.com/v1/marine".to_string(),
            connect_timeout_secs: 5,
            total_timeout_secs: 10,
            ssl_verify: true,
            forecast_days: 4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Append to this file instead of writing to stdout.
    pub file_path: Option<PathBuf>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "cyclone_risk=info".to_string(),
            file_path: None,
            json: false,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    /// A missing file is not an error: defaults are returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `CYCLONE_CONFIG` or `config.toml`, then apply env overrides.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut cfg = Self::load(&path)?;
        if let Ok(locale) = std::env::var(LOCALE_ENV) {
            cfg.locale = locale.parse()?;
        }
        Ok(cfg)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }
}
