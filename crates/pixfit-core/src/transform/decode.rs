//! Image decoding with format detection, dimension limits, and timeout support.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::{ConvertError, ConvertResult};

/// A decoded source raster.
///
/// Owned by one conversion and never mutated by it.
pub struct SourceImage {
    name: String,
    image: DynamicImage,
    format: Option<ImageFormat>,
    natural_width: u32,
    natural_height: u32,
}

impl SourceImage {
    /// Wrap an already decoded image.
    ///
    /// Fails with [`ConvertError::Decode`] when either dimension is zero.
    pub fn from_image(image: DynamicImage, name: &str) -> ConvertResult<Self> {
        let (natural_width, natural_height) = image.dimensions();
        if natural_width == 0 || natural_height == 0 {
            return Err(ConvertError::Decode {
                name: name.to_string(),
                message: format!("degenerate dimensions {natural_width}x{natural_height}"),
            });
        }
        Ok(Self {
            name: name.to_string(),
            image,
            format: None,
            natural_width,
            natural_height,
        })
    }

    /// Decode from an in-memory buffer, detecting the format from content.
    pub fn from_bytes(bytes: &[u8], name: &str) -> ConvertResult<Self> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ConvertError::Decode {
                name: name.to_string(),
                message: format!("Cannot detect image format: {e}"),
            })?;
        let format = reader.format().ok_or_else(|| ConvertError::UnsupportedFormat {
            name: name.to_string(),
            format: "unknown".to_string(),
        })?;
        let image = reader.decode().map_err(|e| ConvertError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let mut source = Self::from_image(image, name)?;
        source.format = Some(format);
        Ok(source)
    }

    /// File name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Format detected while decoding, if decoded from bytes.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn natural_width(&self) -> u32 {
        self.natural_width
    }

    pub fn natural_height(&self) -> u32 {
        self.natural_height
    }

    /// `(natural_width, natural_height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.natural_width, self.natural_height)
    }
}

/// Image decoder with configurable limits and timeout.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    limits: LimitsConfig,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode a buffer on the blocking pool, bounded by `decode_timeout_ms`.
    pub async fn decode_bytes(&self, bytes: Vec<u8>, name: &str) -> ConvertResult<SourceImage> {
        let name_owned = name.to_string();
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);

        let decode_result = timeout(
            timeout_duration,
            tokio::task::spawn_blocking(move || SourceImage::from_bytes(&bytes, &name_owned)),
        )
        .await;

        match decode_result {
            Ok(Ok(Ok(decoded))) => {
                let (width, height) = decoded.dimensions();
                if width > self.limits.max_image_dimension
                    || height > self.limits.max_image_dimension
                {
                    return Err(ConvertError::ImageTooLarge {
                        name: name.to_string(),
                        width,
                        height,
                        max_dim: self.limits.max_image_dimension,
                    });
                }
                Ok(decoded)
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(e)) => Err(ConvertError::Decode {
                name: name.to_string(),
                message: format!("Task join error: {e}"),
            }),
            Err(_) => Err(ConvertError::Timeout {
                name: name.to_string(),
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }
}

/// Lowercase name of a detected input format.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage};

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buf = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut buf)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buf
    }

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Png), "png");
        assert_eq!(format_to_string(ImageFormat::WebP), "webp");
    }

    #[test]
    fn test_from_bytes_reads_dimensions() {
        let source = SourceImage::from_bytes(&jpeg_bytes(64, 48), "test.jpg").unwrap();
        assert_eq!(source.name(), "test.jpg");
        assert_eq!(source.dimensions(), (64, 48));
        assert_eq!(source.format(), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = SourceImage::from_bytes(b"definitely not an image", "notes.jpg");
        assert!(matches!(
            result,
            Err(ConvertError::UnsupportedFormat { .. }) | Err(ConvertError::Decode { .. })
        ));
    }

    #[test]
    fn test_from_bytes_rejects_truncated_jpeg() {
        let bytes = jpeg_bytes(64, 48);
        let result = SourceImage::from_bytes(&bytes[..20], "cut.jpg");
        assert!(matches!(result, Err(ConvertError::Decode { .. })));
    }

    #[test]
    fn test_from_image_rejects_zero_area() {
        let result = SourceImage::from_image(DynamicImage::new_rgb8(0, 10), "empty.png");
        let err = result.err().unwrap();
        assert!(matches!(err, ConvertError::Decode { .. }));
        assert!(err.to_string().contains("0x10"));
    }

    #[tokio::test]
    async fn test_decode_bytes_async() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let source = decoder.decode_bytes(jpeg_bytes(32, 16), "a.jpg").await.unwrap();
        assert_eq!(source.dimensions(), (32, 16));
    }

    #[tokio::test]
    async fn test_decode_bytes_enforces_max_dimension() {
        let limits = LimitsConfig {
            max_image_dimension: 40,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let result = decoder.decode_bytes(jpeg_bytes(64, 16), "wide.jpg").await;
        assert!(matches!(
            result,
            Err(ConvertError::ImageTooLarge {
                width: 64,
                max_dim: 40,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_decode_bytes_times_out() {
        let limits = LimitsConfig {
            decode_timeout_ms: 1,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let result = decoder.decode_bytes(jpeg_bytes(4000, 3000), "slow.jpg").await;
        match result {
            Err(err @ ConvertError::Timeout { .. }) => {
                assert!(err.to_string().contains("slow.jpg after 1ms"));
            }
            other => panic!("expected timeout, got {:?}", other.map(|s| s.dimensions())),
        }
    }
}
