//! Core value types shared by the transform engine and the batch coordinator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, ConvertResult};

/// Target encoding for converted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Webp,
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Declared MIME type of encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Whether padding pixels can stay transparent.
    pub fn supports_transparency(self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }

    /// Whether the format has a lossless codec path.
    pub fn supports_lossless(self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Webp => write!(f, "webp"),
            OutputFormat::Png => write!(f, "png"),
            OutputFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "webp" => Ok(OutputFormat::Webp),
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Policy for painting the canvas before the source is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundFill {
    /// White only for formats without transparency; padding stays clear otherwise.
    #[default]
    ByFormat,
    /// Always white, whatever the output format.
    White,
}

impl BackgroundFill {
    /// Whether the canvas gets an opaque white fill for `format`.
    pub fn fills_white(self, format: OutputFormat) -> bool {
        match self {
            BackgroundFill::White => true,
            BackgroundFill::ByFormat => !format.supports_transparency(),
        }
    }
}

impl fmt::Display for BackgroundFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundFill::ByFormat => write!(f, "by-format"),
            BackgroundFill::White => write!(f, "white"),
        }
    }
}

/// Which inputs are offered to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputAcceptance {
    /// JPEG only
    #[default]
    Jpeg,
    /// JPEG, PNG, WebP, GIF and BMP
    Extended,
}

/// Immutable parameters for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub target_width: u32,
    pub target_height: u32,
    /// 0-100, ignored when `lossless` is set
    pub quality: u8,
    pub lossless: bool,
    pub output_format: OutputFormat,
    pub background: BackgroundFill,
}

impl ProcessingOptions {
    /// Smallest accepted canvas edge.
    pub const MIN_DIMENSION: u32 = 16;
    /// Largest accepted canvas edge.
    pub const MAX_DIMENSION: u32 = 4096;

    pub fn new(target_width: u32, target_height: u32) -> Self {
        Self {
            target_width,
            target_height,
            ..Self::default()
        }
    }

    /// Range-check target dimensions and quality.
    pub fn validate(&self) -> ConvertResult<()> {
        for (axis, value) in [("width", self.target_width), ("height", self.target_height)] {
            if value == 0 {
                return Err(ConvertError::InvalidOptions(format!(
                    "target {axis} must be > 0"
                )));
            }
            if !(Self::MIN_DIMENSION..=Self::MAX_DIMENSION).contains(&value) {
                return Err(ConvertError::InvalidOptions(format!(
                    "target {axis} {value} outside {}..={}",
                    Self::MIN_DIMENSION,
                    Self::MAX_DIMENSION
                )));
            }
        }
        if self.quality > 100 {
            return Err(ConvertError::InvalidOptions(format!(
                "quality {} outside 0..=100",
                self.quality
            )));
        }
        Ok(())
    }

    /// Encoder quality in `[0.0, 1.0]`; lossless always maps to 1.0.
    pub fn effective_quality(&self) -> f32 {
        if self.lossless {
            1.0
        } else {
            f32::from(self.quality.min(100)) / 100.0
        }
    }

    /// Whether the canvas is painted white before drawing.
    pub fn fills_background(&self) -> bool {
        self.background.fills_white(self.output_format)
    }
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            target_width: 200,
            target_height: 200,
            quality: 80,
            lossless: false,
            output_format: OutputFormat::Webp,
            background: BackgroundFill::ByFormat,
        }
    }
}

/// Encoded output of one conversion. Ownership passes to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    bytes: Vec<u8>,
    format: OutputFormat,
    width: u32,
    height: u32,
}

impl EncodedResult {
    pub(crate) fn new(bytes: Vec<u8>, format: OutputFormat, width: u32, height: u32) -> Self {
        Self {
            bytes,
            format,
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte length of the encoded data.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Canvas dimensions `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
