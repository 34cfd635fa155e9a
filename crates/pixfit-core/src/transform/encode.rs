//! Canvas encoding to WebP, PNG and JPEG.
//!
//! | Format | Encoder | Quality |
//! |---|---|---|
//! | WebP lossy | `webp` (libwebp) | `effective_quality * 100` |
//! | WebP lossless | `image::codecs::webp::WebPEncoder` | n/a |
//! | PNG | `image::codecs::png::PngEncoder` | selects compression effort |
//! | JPEG | `image::codecs::jpeg::JpegEncoder` | `effective_quality * 100`, 1-100 |

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{ConvertError, ConvertResult};
use crate::types::{EncodedResult, OutputFormat, ProcessingOptions};

/// Encode a finished canvas according to `options`.
///
/// Fails with [`ConvertError::Encode`] if the encoder errors or yields no bytes.
pub fn encode_canvas(canvas: &RgbaImage, options: &ProcessingOptions) -> ConvertResult<EncodedResult> {
    let format = options.output_format;
    let quality = options.effective_quality();
    let (width, height) = canvas.dimensions();

    let bytes = match format {
        OutputFormat::Webp if options.lossless => encode_webp_lossless(canvas),
        OutputFormat::Webp => encode_webp_lossy(canvas, quality),
        OutputFormat::Png => encode_png(canvas, quality),
        OutputFormat::Jpeg => encode_jpeg(canvas, quality),
    }
    .map_err(|message| ConvertError::Encode {
        format: format.to_string(),
        message,
    })?;

    if bytes.is_empty() {
        return Err(ConvertError::Encode {
            format: format.to_string(),
            message: "encoder produced no data".to_string(),
        });
    }

    tracing::trace!(
        "  Encoded {} {}x{} at q={:.2}: {} bytes",
        format,
        width,
        height,
        quality,
        bytes.len()
    );
    Ok(EncodedResult::new(bytes, format, width, height))
}

/// JPEG quality for an effective quality; lossless callers pass 1.0.
pub fn jpeg_quality(effective_quality: f32) -> u8 {
    (effective_quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// PNG compression effort for an effective quality.
pub fn png_compression(effective_quality: f32) -> CompressionType {
    if effective_quality >= 0.9 {
        CompressionType::Best
    } else if effective_quality <= 0.3 {
        CompressionType::Fast
    } else {
        CompressionType::Default
    }
}

fn encode_webp_lossless(canvas: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    WebPEncoder::new_lossless(&mut buf)
        .encode(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| e.to_string())?;
    Ok(buf)
}

fn encode_webp_lossy(canvas: &RgbaImage, quality: f32) -> Result<Vec<u8>, String> {
    let encoder = webp::Encoder::from_rgba(canvas.as_raw(), canvas.width(), canvas.height());
    let memory = encoder
        .encode_simple(false, quality * 100.0)
        .map_err(|e| format!("libwebp: {e:?}"))?;
    Ok(memory.to_vec())
}

fn encode_png(canvas: &RgbaImage, quality: f32) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, png_compression(quality), PngFilter::Adaptive)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| e.to_string())?;
    Ok(buf)
}

fn encode_jpeg(canvas: &RgbaImage, quality: f32) -> Result<Vec<u8>, String> {
    // JPEG has no alpha channel; the canvas was painted white before drawing
    let rgb = DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality))
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| e.to_string())?;
    Ok(buf)
}
