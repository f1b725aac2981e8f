//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILQUERY_CONFIG` (environment variable)
//! 2. `~/.config/mailquery/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailquery\config.toml` (Windows)
//! 3. Built-in defaults
//!
//! The API base URL can additionally be overridden with
//! `$MAILQUERY_API_BASE_URL`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default API base URL of the public mail endpoints.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Environment variable overriding `server.base_url`.
pub const BASE_URL_ENV: &str = "MAILQUERY_API_BASE_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub server: ServerConfig,
    /// General behavior settings.
    pub general: GeneralConfig,
    /// List ordering sent with every list request.
    pub list: ListConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL, e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Override the directory holding saved credentials.
    pub data_dir: Option<PathBuf>,
    /// UI language code ("en", "zh"). Falls back to the system locale.
    pub lang: Option<String>,
}

/// List ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Sort column understood by the backend ("date", "subject", "from").
    pub sort_by: String,
    /// "asc" or "desc".
    pub sort_order: String,
}

// ── Default implementations ─────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            cache_dir: None,
            data_dir: None,
            lang: None,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            sort_by: "date".to_string(),
            sort_order: "desc".to_string(),
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations, then apply
/// environment overrides.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    let mut config = load_config_file();
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            config.server.base_url = url;
        }
    }
    config
}

fn load_config_file() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("MAILQUERY_CONFIG") {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("mailquery").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailquery")
}

/// Return the directory holding the saved credential record.
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.data_dir {
        return dir.clone();
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailquery")
}
