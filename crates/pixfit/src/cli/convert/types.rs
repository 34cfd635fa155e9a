//! CLI enum types for the convert command.

use clap::ValueEnum;
use pixfit_core::{BackgroundFill, InputAcceptance, OutputFormat, ReportFormat};

/// Encoded output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// WebP (lossy, or lossless with --lossless)
    Webp,
    /// PNG (always lossless)
    Png,
    /// JPEG (no transparency, padding is white)
    #[value(alias = "jpg")]
    Jpeg,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Webp => OutputFormat::Webp,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpeg => OutputFormat::Jpeg,
        }
    }
}

/// Padding fill policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackgroundArg {
    /// White only for formats without transparency
    ByFormat,
    /// Always white
    White,
}

impl From<BackgroundArg> for BackgroundFill {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::ByFormat => BackgroundFill::ByFormat,
            BackgroundArg::White => BackgroundFill::White,
        }
    }
}

/// Which inputs are picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AcceptArg {
    /// JPEG only
    Jpeg,
    /// JPEG, PNG, WebP, GIF, BMP
    Extended,
}

impl From<AcceptArg> for InputAcceptance {
    fn from(arg: AcceptArg) -> Self {
        match arg {
            AcceptArg::Jpeg => InputAcceptance::Jpeg,
            AcceptArg::Extended => InputAcceptance::Extended,
        }
    }
}

/// Report serialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    /// One pretty-printed JSON array
    #[default]
    Json,
    /// One JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Json => ReportFormat::Json,
            ReportFormatArg::Jsonl => ReportFormat::JsonLines,
        }
    }
}
