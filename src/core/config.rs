//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars (a local `.env` may fill in env vars).
//!
//! Config lives at `~/.well/config.toml`. Every key is optional, and a
//! missing file is the same as an empty one. The only required value is
//! the API key, which usually comes from `WELL_API_KEY`.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config File (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct WellConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub editor: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://vulkan.sumeetsaini.com/well";
pub const DEFAULT_EDITOR: &str = "nvim";

pub const API_KEY_VAR: &str = "WELL_API_KEY";
pub const BASE_URL_VAR: &str = "WELL_BASE_URL";
pub const EDITOR_VAR: &str = "EDITOR";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Process-wide settings. Built once at startup and only ever borrowed.
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub editor: String,
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("editor", &self.editor)
            .finish()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No API key in the environment, `.env`, or config file.
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingApiKey => write!(
                f,
                "missing credential: set {API_KEY_VAR} in the environment or in a .env file"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.well`, where the config file and log live.
pub fn well_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".well"))
}

/// Returns the path to `~/.well/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    well_dir().map(|d| d.join("config.toml"))
}

/// Load `~/.well/config.toml`, or an empty config if it isn't there.
pub fn load_config() -> Result<WellConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(WellConfig::default())
        }
    }
}

/// Load a config file from an explicit path.
///
/// A missing file yields `WellConfig::default()`. A file that exists but is
/// malformed returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<WellConfig, ConfigError> {
    if !path.exists() {
        debug!("No config file at {}", path.display());
        return Ok(WellConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WellConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config against the process environment.
///
/// Call after `dotenv::dotenv()` so a local `.env` can supply the key.
pub fn resolve(config: &WellConfig) -> Result<Config, ConfigError> {
    resolve_with(config, |name| std::env::var(name).ok())
}

/// Resolve the final config by collapsing: defaults → config file → env.
///
/// `lookup` stands in for the environment. Blank values count as unset.
pub fn resolve_with<F>(config: &WellConfig, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    // API key: env → config
    let api_key = present(lookup(API_KEY_VAR))
        .or_else(|| present(config.api_key.clone()))
        .ok_or(ConfigError::MissingApiKey)?
        .trim()
        .to_string();

    // Base URL: env → config → default
    let base_url = present(lookup(BASE_URL_VAR))
        .or_else(|| present(config.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim()
        .trim_end_matches('/')
        .to_string();

    // Editor: env → config → default
    let editor = present(lookup(EDITOR_VAR))
        .or_else(|| present(config.editor.clone()))
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

    let resolved = Config {
        base_url,
        api_key,
        editor,
    };
    debug!("Resolved config: {:?}", resolved);
    Ok(resolved)
}
