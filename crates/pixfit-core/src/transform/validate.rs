//! Input validation before decoding.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{ConvertError, ConvertResult};

/// Validates inputs before a full decode.
#[derive(Debug, Clone)]
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check that a file exists and is within the size limit.
    pub fn check_file(&self, path: &Path) -> ConvertResult<u64> {
        if !path.exists() {
            return Err(ConvertError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| ConvertError::Decode {
            name: path.display().to_string(),
            message: format!("Cannot read metadata: {e}"),
        })?;
        self.check_size(metadata.len(), &path.display().to_string())?;
        Ok(metadata.len())
    }

    /// Quick checks on an in-memory buffer: size limit and magic bytes.
    pub fn validate_bytes(&self, bytes: &[u8], name: &str) -> ConvertResult<()> {
        self.check_size(bytes.len() as u64, name)?;

        if bytes.len() < 4 {
            return Err(ConvertError::Decode {
                name: name.to_string(),
                message: "File too small to be a valid image".to_string(),
            });
        }
        if !Self::is_valid_image_header(bytes) {
            return Err(ConvertError::Decode {
                name: name.to_string(),
                message: "Unrecognized image format (invalid magic bytes)".to_string(),
            });
        }
        Ok(())
    }

    /// Check a byte length against `max_file_size_mb`.
    pub fn check_size(&self, len: u64, name: &str) -> ConvertResult<()> {
        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if len > max_bytes {
            return Err(ConvertError::FileTooLarge {
                name: name.to_string(),
                size_mb: len / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }
        Ok(())
    }

    /// Check whether the leading bytes match a raster family we can decode.
    fn is_valid_image_header(header: &[u8]) -> bool {
        match header {
            // JPEG: FF D8 FF
            [0xFF, 0xD8, 0xFF, ..] => true,
            // PNG: 89 50 4E 47
            [0x89, b'P', b'N', b'G', ..] => true,
            // GIF: GIF8
            [b'G', b'I', b'F', b'8', ..] => true,
            // WebP: RIFF....WEBP; a short RIFF header is let through to the decoder
            [b'R', b'I', b'F', b'F', rest @ ..] => rest.len() < 8 || &rest[4..8] == b"WEBP",
            // BMP: BM
            [b'B', b'M', ..] => true,
            _ => false,
        }
    }
}
