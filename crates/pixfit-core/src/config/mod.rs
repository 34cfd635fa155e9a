//! Configuration management for pixfit.
//!
//! Configuration is loaded from the platform config directory with defaults
//! matching the interactive converter (200x200 WebP at quality 80).

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::types::ProcessingOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for pixfit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canvas and encoder settings
    pub output: OutputConfig,

    /// Input acceptance
    pub input: InputConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Archive settings
    pub archive: ArchiveConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.pixfit.pixfit/config.toml
    /// - Linux: ~/.config/pixfit/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\pixfit\config\config.toml
    ///
    /// Falls back to ~/.pixfit/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pixfit", "pixfit")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".pixfit").join("config.toml")
            })
    }

    /// Resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.output.dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Build the per-conversion options from the `[output]` section.
    pub fn processing_options(&self) -> ProcessingOptions {
        ProcessingOptions {
            target_width: self.output.width,
            target_height: self.output.height,
            quality: self.output.quality,
            lossless: self.output.lossless,
            output_format: self.output.format,
            background: self.output.background,
        }
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
