//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\gaana-source\config.toml
//! - macOS: ~/Library/Application Support/gaana-source/config.toml
//! - Linux: ~/.config/gaana-source/config.toml
//!
//! The config file is human-readable and editable. A missing file yields
//! defaults, but an unreadable or unparseable file is a fatal error: a
//! half-read config silently pointing lookups at the wrong gateway is
//! worse than stopping.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata source settings
    pub source: SourceConfig,
}

/// Gaana source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Gaana API gateway base URL. Required before any lookup can run;
    /// there is no sensible default because the gateway is self-hosted.
    pub baseurl: Option<String>,

    /// Scales this source's aggregate distance so its candidates can be
    /// biased against other sources' (lower = more trusted)
    pub source_weight: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            baseurl: None,
            source_weight: 0.5,
        }
    }
}

impl Config {
    /// The gateway base URL; absent, empty or blank is a fatal
    /// configuration error surfaced to the operator.
    pub fn require_baseurl(&self) -> Result<&str, ConfigError> {
        match self.source.baseurl.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ConfigError::MissingBaseUrl),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gaana-source"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the standard location.
///
/// A missing file yields the defaults (the baseurl check happens when a
/// source is built, so `config init` and `--baseurl` keep working); any
/// other failure is fatal.
pub fn load() -> Result<Config, ConfigError> {
    let Some(path) = config_path() else {
        return Err(ConfigError::NoConfigDir);
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    load_from(&path)
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    // Ensure directory exists
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Gateway baseurl is not configured: set `baseurl` under [source] in config.toml, or pass --baseurl / GAANA_BASEURL")]
    MissingBaseUrl,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
