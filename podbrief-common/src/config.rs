//! Bootstrap configuration loading
//!
//! Configuration is read once at startup. Sources, highest priority first:
//! 1. Command-line arguments (applied by the binary after loading)
//! 2. Environment variables (`OPENAI_API_KEY`, `PODBRIEF_DB_PATH`, `PODBRIEF_PORT`)
//! 3. TOML configuration file
//! 4. Built-in defaults (every field has one)
//!
//! The TOML file is located by: explicit path → `PODBRIEF_CONFIG` →
//! `<config dir>/podbrief/podbrief.toml`. A missing file is not an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "PODBRIEF_CONFIG";

/// Top-level bootstrap configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the built single-page app; not served when unset
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// SQLite location
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error); `RUST_LOG` wins
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Chat-completion API settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompletionConfig {
    /// Bearer token; the service starts without one but every model call fails
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Higher-capability model, tried first by pipelines that support fallback
    #[serde(default = "default_advanced_model")]
    pub advanced_model: String,
    /// Lower-capability model, used directly or as the fallback tier
    #[serde(default = "default_standard_model")]
    pub standard_model: String,
    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            advanced_model: default_advanced_model(),
            standard_model: default_standard_model(),
            timeout_secs: default_completion_timeout(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

/// Content fetching settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Caption languages tried in order when pulling video transcripts
    #[serde(default = "default_transcript_languages")]
    pub transcript_languages: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            transcript_languages: default_transcript_languages(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("podbrief").join("podbrief.db"))
        .unwrap_or_else(|| PathBuf::from("./data/podbrief.db"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_advanced_model() -> String {
    "gpt-4".to_string()
}

fn default_standard_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_completion_timeout() -> u64 {
    60
}

fn default_requests_per_minute() -> u32 {
    60
}

fn default_fetch_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string()
}

fn default_transcript_languages() -> Vec<String> {
    vec!["en".to_string()]
}

/// Locate the config file to read, if any
///
/// An explicit path is returned even when it does not exist so that
/// `load_config` can report it; discovered paths must exist.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("podbrief").join("podbrief.toml"))
        .filter(|p| p.exists())
}

/// Parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}

/// Load configuration from file (if any) and apply environment overrides
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let mut config = match resolve_config_path(explicit) {
        Some(path) if path.exists() => {
            info!("Loading configuration from {}", path.display());
            read_toml_config(&path)?
        }
        Some(path) => {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        None => {
            info!("No configuration file found, using built-in defaults");
            TomlConfig::default()
        }
    };

    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

impl TomlConfig {
    /// Overlay environment variables onto file values
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env("OPENAI_API_KEY") {
            if self.completion.api_key.is_some() {
                warn!("OPENAI_API_KEY overrides completion.api_key from config file");
            }
            self.completion.api_key = Some(key);
        }

        if let Some(path) = non_empty_env("PODBRIEF_DB_PATH").or_else(|| non_empty_env("DB_PATH")) {
            self.database.path = PathBuf::from(path);
        }

        if let Some(port) = non_empty_env("PODBRIEF_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid PODBRIEF_PORT"),
            }
        }
    }

    /// Reject values that would make the service unusable
    pub fn validate(&self) -> Result<()> {
        if self.completion.requests_per_minute == 0 {
            return Err(Error::Config(
                "completion.requests_per_minute must be at least 1".to_string(),
            ));
        }
        if self.completion.timeout_secs == 0 || self.fetch.timeout_secs == 0 {
            return Err(Error::Config("timeouts must be at least 1 second".to_string()));
        }
        if self.completion.advanced_model.trim().is_empty()
            || self.completion.standard_model.trim().is_empty()
        {
            return Err(Error::Config("model names cannot be empty".to_string()));
        }
        Ok(())
    }

    /// True when a usable completion API key is configured
    pub fn has_api_key(&self) -> bool {
        self.completion
            .api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
