//! The conversion routine: canvas, background, contain-fit draw, encode.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::decode::SourceImage;
use super::encode::encode_canvas;
use super::geometry::{contain_placement, Placement};
use crate::error::{ConvertError, ConvertResult};
use crate::types::{EncodedResult, ProcessingOptions};

/// Resampling filter for the single scaling pass.
const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Convert a decoded source into an encoded canvas of exactly
/// `options.target_width` x `options.target_height`.
///
/// Neither `source` nor `options` is modified; the drawing surface is
/// allocated here and dropped before returning.
pub fn convert(source: &SourceImage, options: &ProcessingOptions) -> ConvertResult<EncodedResult> {
    options.validate()?;
    let placement = placement_for(source, options)?;
    let canvas = render(source, &placement, options);
    encode_canvas(&canvas, options)
}

/// Decode `bytes` and convert them in one synchronous call.
pub fn convert_bytes(
    bytes: &[u8],
    name: &str,
    options: &ProcessingOptions,
) -> ConvertResult<EncodedResult> {
    let source = SourceImage::from_bytes(bytes, name)?;
    convert(&source, options)
}

/// Contain-fit placement of `source` on the target canvas.
pub fn placement_for(source: &SourceImage, options: &ProcessingOptions) -> ConvertResult<Placement> {
    contain_placement(
        source.dimensions(),
        (options.target_width, options.target_height),
    )
    .ok_or_else(|| ConvertError::Decode {
        name: source.name().to_string(),
        message: format!(
            "cannot place {}x{} source on {}x{} canvas",
            source.natural_width(),
            source.natural_height(),
            options.target_width,
            options.target_height
        ),
    })
}

/// Draw `source` onto a fresh canvas at `placement`.
pub fn render(source: &SourceImage, placement: &Placement, options: &ProcessingOptions) -> RgbaImage {
    let (width, height) = (options.target_width, options.target_height);
    let mut canvas = if options.fills_background() {
        RgbaImage::from_pixel(width, height, WHITE)
    } else {
        RgbaImage::new(width, height)
    };

    let rect = placement.to_pixels((width, height));
    let scaled = imageops::resize(source.image(), rect.width, rect.height, RESAMPLE_FILTER);
    imageops::overlay(&mut canvas, &scaled, i64::from(rect.x), i64::from(rect.y));
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BackgroundFill, OutputFormat};
    use image::{DynamicImage, GenericImageView, RgbImage};

    fn red_source(width: u32, height: u32) -> SourceImage {
        let img = RgbImage::from_pixel(width, height, image::Rgb([255, 0, 0]));
        SourceImage::from_image(DynamicImage::ImageRgb8(img), "red.png").unwrap()
    }

    fn options(format: OutputFormat, background: BackgroundFill) -> ProcessingOptions {
        ProcessingOptions {
            target_width: 200,
            target_height: 200,
            output_format: format,
            background,
            ..ProcessingOptions::default()
        }
    }

    #[test]
    fn test_render_letterbox_transparent_padding() {
        let source = red_source(400, 200);
        let opts = options(OutputFormat::Png, BackgroundFill::ByFormat);
        let placement = placement_for(&source, &opts).unwrap();
        let canvas = render(&source, &placement, &opts);

        assert_eq!(canvas.dimensions(), (200, 200));
        // Padding band above and below
        assert_eq!(canvas.get_pixel(100, 10)[3], 0);
        assert_eq!(canvas.get_pixel(100, 190)[3], 0);
        // Image body
        assert_eq!(*canvas.get_pixel(100, 100), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(0, 50), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(199, 149), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_render_white_padding_when_forced() {
        let source = red_source(400, 200);
        let opts = options(OutputFormat::Png, BackgroundFill::White);
        let placement = placement_for(&source, &opts).unwrap();
        let canvas = render(&source, &placement, &opts);

        assert_eq!(*canvas.get_pixel(100, 10), WHITE);
        assert_eq!(*canvas.get_pixel(100, 100), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_render_jpeg_always_white() {
        let source = red_source(200, 400);
        let opts = options(OutputFormat::Jpeg, BackgroundFill::ByFormat);
        let placement = placement_for(&source, &opts).unwrap();
        let canvas = render(&source, &placement, &opts);

        assert_eq!(*canvas.get_pixel(10, 100), WHITE);
        assert_eq!(*canvas.get_pixel(190, 100), WHITE);
    }

    #[test]
    fn test_render_upscale_fills_canvas() {
        let source = red_source(100, 100);
        let opts = options(OutputFormat::Png, BackgroundFill::ByFormat);
        let placement = placement_for(&source, &opts).unwrap();
        assert_eq!(placement.scale, 2.0);

        let canvas = render(&source, &placement, &opts);
        assert!(canvas.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_convert_png_roundtrip_dimensions() {
        let source = red_source(400, 200);
        let opts = options(OutputFormat::Png, BackgroundFill::ByFormat);
        let result = convert(&source, &opts).unwrap();

        let decoded = image::load_from_memory(result.bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (200, 200));
        assert_eq!(decoded.get_pixel(100, 5)[3], 0);
        assert_eq!(decoded.get_pixel(100, 100), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_convert_jpeg_padding_is_white() {
        let source = red_source(400, 200);
        let opts = ProcessingOptions {
            quality: 95,
            ..options(OutputFormat::Jpeg, BackgroundFill::ByFormat)
        };
        let result = convert(&source, &opts).unwrap();
        assert_eq!(result.mime_type(), "image/jpeg");

        let decoded = image::load_from_memory(result.bytes()).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (200, 200));
        let corner = decoded.get_pixel(100, 5);
        assert!(corner.0.iter().all(|&c| c > 240), "padding not white: {corner:?}");
    }

    #[test]
    fn test_convert_webp_output_size_fixed() {
        let source = red_source(37, 91);
        let opts = ProcessingOptions {
            target_width: 64,
            target_height: 48,
            ..options(OutputFormat::Webp, BackgroundFill::White)
        };
        let result = convert(&source, &opts).unwrap();
        assert_eq!(result.dimensions(), (64, 48));
        assert_eq!(&result.bytes()[8..12], b"WEBP");
    }

    #[test]
    fn test_convert_rejects_invalid_options() {
        let source = red_source(10, 10);
        let opts = ProcessingOptions::new(0, 200);
        assert!(matches!(
            convert(&source, &opts),
            Err(ConvertError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_placement_error_names_source_file() {
        let source = red_source(10, 10);
        let err = placement_for(&source, &ProcessingOptions::new(0, 200)).unwrap_err();
        assert!(matches!(&err, ConvertError::Decode { name, .. } if name == "red.png"));
        assert!(err.to_string().contains("10x10 source on 0x200 canvas"));
    }

    #[test]
    fn test_convert_bytes_rejects_non_image() {
        let opts = ProcessingOptions::default();
        assert!(convert_bytes(b"GIF89a-but-not-really", "fake.gif", &opts).is_err());
    }

    #[test]
    fn test_convert_leaves_inputs_untouched() {
        let source = red_source(300, 100);
        let opts = options(OutputFormat::Webp, BackgroundFill::ByFormat);
        let before = opts;
        convert(&source, &opts).unwrap();
        convert(&source, &opts).unwrap();
        assert_eq!(opts, before);
        assert_eq!(source.dimensions(), (300, 100));
    }
}
