//! The `pixfit convert` command for batch image conversion.

mod batch;
mod setup;
pub mod types;

pub use types::{AcceptArg, BackgroundArg, FormatArg, ReportFormatArg};

use clap::Args;
use pixfit_core::FileDiscovery;
use std::path::PathBuf;

use batch::run_batch;
use setup::setup_converter;

/// Arguments for the `convert` command.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Image files or directories to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Target canvas width in pixels (16-4096)
    #[arg(long)]
    pub width: Option<u32>,

    /// Target canvas height in pixels (16-4096)
    #[arg(long)]
    pub height: Option<u32>,

    /// Encoder quality (0-100), ignored with --lossless
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Use the lossless codec where the format has one
    #[arg(long)]
    pub lossless: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Padding fill policy
    #[arg(long, value_enum)]
    pub background: Option<BackgroundArg>,

    /// Which input types to pick up
    #[arg(long, value_enum)]
    pub accept: Option<AcceptArg>,

    /// Directory for converted files (and the default archive location)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Write a single ZIP instead of individual files.
    /// Without a value, uses the configured archive name in the output directory.
    #[arg(long, value_name = "PATH")]
    pub archive: Option<Option<PathBuf>>,

    /// Write a JSON report of every item to this path
    #[arg(long)]
    pub json_report: Option<PathBuf>,

    /// Layout of the --json-report file
    #[arg(long, value_enum, default_value_t = ReportFormatArg::Json)]
    pub report_format: ReportFormatArg,
}

/// Execute the convert command.
pub async fn execute(args: ConvertArgs) -> anyhow::Result<()> {
    let ctx = setup_converter(&args)?;

    let files = FileDiscovery::new(ctx.config.input.accept).discover_all(&args.inputs);
    if files.is_empty() {
        tracing::warn!("No accepted image files found in {:?}", args.inputs);
        return Ok(());
    }
    tracing::info!(
        "Found {} image(s) to convert ({})",
        files.len(),
        pixfit_core::format_file_size(FileDiscovery::total_size(&files))
    );

    run_batch(ctx, &args, files).await
}
