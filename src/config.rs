//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`SAHAYAK_*`, `GEMINI_API_KEY`)
//! 2. Config file (`~/.sahayak/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use crate::media::DEFAULT_MAX_UPLOAD_BYTES;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default text-generation model.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Default image-generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Generation backend configuration.
    pub genai: GenAiConfig,

    /// Media handling configuration.
    pub media: MediaConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the sahayak home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_sahayak_home(),
        }
    }
}

/// Generation backend configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    /// API key for the Gemini API. Usually supplied via `GEMINI_API_KEY`.
    pub api_key: Option<String>,

    /// Model used for structured text generation.
    pub text_model: String,

    /// Model used for visual-aid image generation.
    pub image_model: String,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

/// Media handling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Maximum accepted upload size in bytes. Uploads are buffered in memory
    /// for data-URI conversion, so this bounds that buffer.
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Get the default sahayak home directory.
fn default_sahayak_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".sahayak"), |h| h.join(".sahayak"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    // Try to load config file
    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    }

    // Override with environment variables
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("SAHAYAK_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("SAHAYAK_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_sahayak_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    // Storage path
    if let Ok(path) = env::var("SAHAYAK_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("SAHAYAK_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    // Generation backend
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            config.genai.api_key = Some(key);
        }
    }

    if let Ok(model) = env::var("SAHAYAK_TEXT_MODEL") {
        config.genai.text_model = model;
    }

    if let Ok(model) = env::var("SAHAYAK_IMAGE_MODEL") {
        config.genai.image_model = model;
    }

    // Media
    if let Ok(val) = env::var("SAHAYAK_MAX_UPLOAD_BYTES") {
        if let Ok(bytes) = val.parse() {
            config.media.max_upload_bytes = bytes;
        }
    }
}
