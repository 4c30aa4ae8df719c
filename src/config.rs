use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::duration::{deserialize_duration, serialize_duration};

/// Base URLs of the backend services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub auth_url: String,
    pub portfolio_url: String,
    pub market_data_url: String,
    pub expense_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://localhost:9898".to_string(),
            portfolio_url: "http://localhost:9811".to_string(),
            market_data_url: "http://localhost:8010".to_string(),
            expense_url: "http://localhost:9812".to_string(),
        }
    }
}

/// Default per-request timeout (10 seconds).
fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

/// HTTP behaviour shared by every service client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Upper bound for a single request. A timed-out price lookup falls back
    /// to cost basis like any other lookup failure.
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub request_timeout: Duration,

    /// Value sent in the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: format!("folioview/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Display/output formatting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Round rendered money values to this many decimal places.
    ///
    /// Presentation only; calculations always use full precision.
    pub currency_decimals: Option<u32>,

    /// Render money values with thousands separators.
    pub currency_grouping: bool,

    /// Optional currency symbol prefix (e.g. "$", "₹").
    pub currency_symbol: Option<String>,
}

/// Application configuration, loaded from `folioview.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub services: ServicesConfig,
    pub http: HttpConfig,
    pub display: DisplayConfig,

    /// Where the login session is cached. Relative paths are resolved from
    /// the config file's directory; unset means the user cache directory.
    pub session_file: Option<PathBuf>,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load config from a file, or return the defaults if it doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the session cache location relative to `config_dir`.
    pub fn resolve_session_file(&self, config_dir: &Path) -> Option<PathBuf> {
        match &self.session_file {
            Some(path) if path.is_absolute() => Some(path.clone()),
            Some(path) => Some(config_dir.join(path)),
            None => None,
        }
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./folioview.toml` if it exists in the current directory
/// 2. `<config dir>/folioview/folioview.toml`
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("folioview.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("folioview").join("folioview.toml");
    }

    local_config
}
