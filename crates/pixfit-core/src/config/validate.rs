//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::types::ProcessingOptions;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = ProcessingOptions::MIN_DIMENSION..=ProcessingOptions::MAX_DIMENSION;
        if !dims.contains(&self.output.width) {
            return Err(ConfigError::ValidationError(format!(
                "output.width must be between {} and {}",
                ProcessingOptions::MIN_DIMENSION,
                ProcessingOptions::MAX_DIMENSION
            )));
        }
        if !dims.contains(&self.output.height) {
            return Err(ConfigError::ValidationError(format!(
                "output.height must be between {} and {}",
                ProcessingOptions::MIN_DIMENSION,
                ProcessingOptions::MAX_DIMENSION
            )));
        }
        if self.output.quality > 100 {
            return Err(ConfigError::ValidationError(
                "output.quality must be between 0 and 100".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if self.archive.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "archive.file_name must not be empty".into(),
            ));
        }
        if !(0..=9).contains(&self.archive.compression_level) {
            return Err(ConfigError::ValidationError(
                "archive.compression_level must be between 0 and 9".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}
