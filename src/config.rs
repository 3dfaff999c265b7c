//! Service configuration file handling
//!
//! Loads and manages the ~/.config/district-news/config.yaml file.
//! Every field has a usable default except the upstream API key, which
//! must come from the file or the `NEWSDATA_API_KEY` environment
//! variable (the environment always wins so the secret can stay out of
//! the file in deployments).

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "NEWSDATA_API_KEY";

/// Placeholder written by `init`; treated as "not configured"
const PLACEHOLDER_API_KEY: &str = "your-newsdata-api-key";

/// Service configuration
///
/// Represents the complete ~/.config/district-news/config.yaml file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Upstream news provider API key
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Upstream news provider endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Country code passed to the upstream provider on every query
    #[serde(default = "default_country")]
    pub country: String,

    /// Cache entry time-to-live in milliseconds (24 hours)
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: i64,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Path to the SQLite cache database
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_endpoint() -> String {
    "https://newsdata.io/api/1/news".to_string()
}

fn default_country() -> String {
    "in".to_string()
}

fn default_ttl_ms() -> i64 {
    24 * 60 * 60 * 1000
}

fn default_bind() -> String {
    "127.0.0.1:8380".to_string()
}

fn default_db_path() -> PathBuf {
    let mut path = config_dir();
    path.push("cache.db");
    path
}

/// Always use ~/.config for consistency across platforms (macOS, Linux)
fn config_dir() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("district-news");
    path
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            endpoint: default_endpoint(),
            country: default_country(),
            ttl_ms: default_ttl_ms(),
            bind: default_bind(),
            db_path: default_db_path(),
        }
    }
}

impl ServiceConfig {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        let mut path = config_dir();
        path.push("config.yaml");
        path
    }

    /// Load configuration from a YAML file, applying the environment
    /// override for the API key
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: ServiceConfig = serde_yaml::from_str(&contents)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from the given path if it exists, otherwise fall back to
    /// defaults (still honoring the environment override)
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            let mut config = Self::default();
            config.apply_env();
            Ok(config)
        }
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Whether a real API key is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.api_key = key;
            }
        }
    }
}
