//! Sub-configuration structs with defaults matching the interactive tool.

use serde::{Deserialize, Serialize};

use crate::types::{BackgroundFill, InputAcceptance, OutputFormat};

/// Output canvas and encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Canvas width in pixels (16-4096)
    pub width: u32,

    /// Canvas height in pixels (16-4096)
    pub height: u32,

    /// Lossy quality (0-100), ignored when lossless
    pub quality: u8,

    /// Encode losslessly where the format allows it
    pub lossless: bool,

    /// Target format: "webp", "png" or "jpeg"
    pub format: OutputFormat,

    /// Background policy: "by-format" or "white"
    pub background: BackgroundFill,

    /// Directory for individual output files (supports ~)
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            quality: 80,
            lossless: false,
            format: OutputFormat::Webp,
            background: BackgroundFill::ByFormat,
            dir: "./converted".to_string(),
        }
    }
}

/// Input acceptance settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// "jpeg" (default) or "extended" (jpeg, png, webp, gif, bmp)
    pub accept: InputAcceptance,
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum decoded image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
            decode_timeout_ms: 10000,
        }
    }
}

/// Archive packaging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Default archive file name
    pub file_name: String,

    /// Deflate level (1-9); 0 stores entries uncompressed
    pub compression_level: i64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            file_name: "converted-images.zip".to_string(),
            compression_level: 6,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
