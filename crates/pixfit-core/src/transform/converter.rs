//! Conversion orchestration: validate, decode, place, draw, encode.

use std::path::Path;

use crate::config::{Config, LimitsConfig};
use crate::error::ConvertResult;
use crate::types::{EncodedResult, ProcessingOptions};

use super::decode::{format_to_string, ImageDecoder};
use super::engine;
use super::validate::Validator;

/// Converts raw image bytes with a fixed set of options.
///
/// Holds no per-image state; every call allocates and releases its own
/// drawing surface.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ProcessingOptions,
    decoder: ImageDecoder,
    validator: Validator,
}

impl Converter {
    /// Create a converter, rejecting invalid options up front.
    pub fn new(options: ProcessingOptions, limits: LimitsConfig) -> ConvertResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            decoder: ImageDecoder::new(limits.clone()),
            validator: Validator::new(limits),
        })
    }

    /// Create a converter from the `[output]` and `[limits]` sections.
    pub fn from_config(config: &Config) -> ConvertResult<Self> {
        Self::new(config.processing_options(), config.limits.clone())
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Check that `path` exists and is within the size limit, without reading it.
    pub fn check_file(&self, path: &Path) -> ConvertResult<u64> {
        self.validator.check_file(path)
    }

    /// Convert one in-memory image.
    pub async fn convert_bytes(&self, bytes: Vec<u8>, name: &str) -> ConvertResult<EncodedResult> {
        let start = std::time::Instant::now();
        tracing::debug!("Converting: {}", name);

        self.validator.validate_bytes(&bytes, name)?;

        let decode_start = std::time::Instant::now();
        let source = self.decoder.decode_bytes(bytes, name).await?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let render_start = std::time::Instant::now();
        let result = engine::convert(&source, &self.options)?;
        tracing::trace!("  Render + encode: {:?}", render_start.elapsed());

        tracing::debug!(
            "Converted {} ({}, {}x{}) -> {} {}x{}, {} bytes in {:?}",
            name,
            source.format().map(format_to_string).unwrap_or_default(),
            source.natural_width(),
            source.natural_height(),
            result.format(),
            self.options.target_width,
            self.options.target_height,
            result.len(),
            start.elapsed()
        );
        Ok(result)
    }

    /// Read and convert one file.
    pub async fn convert_path(&self, path: &Path) -> ConvertResult<EncodedResult> {
        self.validator.check_file(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| crate::error::ConvertError::Decode {
                name: name.clone(),
                message: format!("Cannot read file: {e}"),
            })?;
        self.convert_bytes(bytes, &name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::types::OutputFormat;
    use image::{ImageEncoder, RgbImage};

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([10, 200, 30]));
        let mut buf = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut buf)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buf
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let result = Converter::new(ProcessingOptions::new(8, 8), LimitsConfig::default());
        assert!(matches!(result, Err(ConvertError::InvalidOptions(_))));
    }

    #[test]
    fn test_from_config_uses_output_section() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Png;
        let converter = Converter::from_config(&config).unwrap();
        assert_eq!(converter.options().output_format, OutputFormat::Png);
    }

    #[tokio::test]
    async fn test_convert_bytes_produces_target_canvas() {
        let converter =
            Converter::new(ProcessingOptions::new(120, 80), LimitsConfig::default()).unwrap();
        let result = converter
            .convert_bytes(jpeg_bytes(300, 300), "square.jpg")
            .await
            .unwrap();
        assert_eq!(result.dimensions(), (120, 80));
        assert_eq!(result.mime_type(), "image/webp");
        assert!(!result.is_empty());
    }

    #[tokio::test]
    async fn test_convert_bytes_rejects_bad_magic() {
        let converter = Converter::new(ProcessingOptions::default(), LimitsConfig::default()).unwrap();
        let err = converter
            .convert_bytes(b"plain text pretending".to_vec(), "fake.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::Decode { .. }));
        assert!(err.to_string().contains("fake.jpg"));
    }

    #[tokio::test]
    async fn test_convert_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, jpeg_bytes(64, 32)).unwrap();

        let converter = Converter::new(ProcessingOptions::default(), LimitsConfig::default()).unwrap();
        let result = converter.convert_path(&path).await.unwrap();
        assert_eq!(result.dimensions(), (200, 200));
    }

    #[tokio::test]
    async fn test_convert_path_missing_file() {
        let converter = Converter::new(ProcessingOptions::default(), LimitsConfig::default()).unwrap();
        let err = converter
            .convert_path(Path::new("/nonexistent/photo.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound(_)));
    }
}
