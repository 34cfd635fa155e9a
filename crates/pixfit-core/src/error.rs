//! Error types for the pixfit conversion pipeline.
//!
//! Errors are organized by stage so that per-item failures recorded by the
//! batch coordinator carry a readable message naming the file involved.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for pixfit operations.
#[derive(Error, Debug)]
pub enum PixfitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Conversion errors
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Archive packaging errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors produced while converting a single image.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Source bytes are not a loadable raster, or have degenerate dimensions
    #[error("Decode error for {name}: {message}")]
    Decode { name: String, message: String },

    /// The canvas could not be encoded, or the encoder produced no data
    #[error("Failed to encode {format}: {message}")]
    Encode { format: String, message: String },

    /// Target dimensions or quality out of range
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Decoding did not finish in time
    #[error("Timeout decoding {name} after {timeout_ms}ms")]
    Timeout { name: String, timeout_ms: u64 },

    /// File exceeds size limit
    #[error("File too large: {name} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        name: String,
        size_mb: u64,
        max_mb: u64,
    },

    /// Decoded image dimensions exceed limit
    #[error("Image too large: {name} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        name: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Input is not an accepted raster format
    #[error("Unsupported format for {name}: {format}")]
    UnsupportedFormat { name: String, format: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Archive packaging errors.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The ZIP writer rejected an entry or failed to finish
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing entry data failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for pixfit results.
pub type Result<T> = std::result::Result<T, PixfitError>;

/// Convenience type alias for single-conversion results.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_file() {
        let err = ConvertError::Decode {
            name: "broken.jpg".to_string(),
            message: "unexpected EOF".to_string(),
        };
        assert_eq!(err.to_string(), "Decode error for broken.jpg: unexpected EOF");
    }

    #[test]
    fn test_convert_error_wraps_into_top_level() {
        let err: PixfitError = ConvertError::InvalidOptions("width must be > 0".into()).into();
        assert!(err.to_string().contains("width must be > 0"));
    }
}
