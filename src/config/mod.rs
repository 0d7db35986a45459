//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Configuration for download operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Delay between bulk downloads in milliseconds.
    pub delay_ms: u64,
    /// Whether to overwrite existing files.
    pub force_overwrite: bool,
    /// Whether to clean up `.part` files on download error.
    pub cleanup_on_error: bool,
    /// Optional token-proxy endpoint; when set, its token is attached to
    /// direct-link requests as a bearer credential.
    pub token_endpoint: Option<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            force_overwrite: false,
            cleanup_on_error: true,
            token_endpoint: None,
        }
    }
}

impl DownloadConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inter-download delay in milliseconds.
    #[must_use]
    pub const fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets whether to force overwrite existing files.
    #[must_use]
    pub const fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Sets whether to clean up `.part` files on download error.
    #[must_use]
    pub const fn with_cleanup_on_error(mut self, cleanup: bool) -> Self {
        self.cleanup_on_error = cleanup;
        self
    }

    /// Sets the token-proxy endpoint.
    #[must_use]
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = Some(endpoint.into());
        self
    }
}

/// Path configuration for download and config directories.
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Directory where downloaded files are saved.
    pub download_dir: PathBuf,
    /// Directory where configuration files are read from.
    pub config_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            download_dir: PathBuf::from("."),
            config_dir: config_dir.join("gofile-dl"),
        }
    }
}

/// Token-proxy server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Whether to enable the token-proxy server.
    pub enabled: bool,
    /// Server bind address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "127.0.0.1".to_string(),
            port: 9724,
        }
    }
}

/// On-disk configuration file shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    download: DownloadConfig,
    api: ApiConfig,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Download configuration.
    pub download: DownloadConfig,
    /// Path configuration.
    pub paths: PathConfig,
    /// Token-proxy configuration.
    pub api: ApiConfig,
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration, reading `config.toml` from the config
    /// directory when present and falling back to defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing config file fails to parse.
    pub fn load() -> crate::Result<Self> {
        let paths = PathConfig::default();
        let file = paths.config_dir.join("config.toml");
        match std::fs::read_to_string(&file) {
            Ok(raw) => Self::from_toml(&raw, paths),
            Err(_) => Ok(Self {
                paths,
                ..Self::default()
            }),
        }
    }

    fn from_toml(raw: &str, paths: PathConfig) -> crate::Result<Self> {
        let parsed: ConfigFile =
            toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            download: parsed.download,
            paths,
            api: parsed.api,
        })
    }
}
