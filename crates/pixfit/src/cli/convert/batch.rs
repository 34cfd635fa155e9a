//! Batch conversion: progress bar, output files or archive, JSON report, summary.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use pixfit_core::archive::unique_name;
use pixfit_core::{
    format_file_size, BatchCoordinator, BatchSummary, DiscoveredFile, FileItem, ProgressReporter,
    ReportFormat, ReportWriter,
};

use super::setup::ConvertContext;
use super::ConvertArgs;

/// Drives an `indicatif` bar from coordinator progress callbacks.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn item_started(&self, item: &FileItem) {
        self.bar.set_message(item.name().to_string());
    }

    fn item_finished(&self, _item: &FileItem, done: usize, _total: usize) {
        self.bar.set_position(done as u64);
    }
}

/// Convert discovered files and write the results.
pub async fn run_batch(
    ctx: ConvertContext,
    args: &ConvertArgs,
    files: Vec<DiscoveredFile>,
) -> anyhow::Result<()> {
    let mut batch = BatchCoordinator::with_converter(ctx.converter);
    for file in &files {
        if let Err(e) = batch.add_path(&file.path) {
            tracing::error!("Skipping {:?}: {}", file.path, e);
        }
    }

    let reporter = BarReporter {
        bar: create_progress_bar(batch.items().len() as u64)?,
    };
    let start_time = std::time::Instant::now();
    batch.process_pending(&reporter).await;
    let elapsed = start_time.elapsed();
    reporter.bar.finish_and_clear();

    let written = match &ctx.archive_path {
        Some(path) => write_archive(&batch, path, ctx.config.archive.compression_level)?,
        None => write_files(&batch, &ctx.output_dir)?,
    };

    if let Some(report_path) = &args.json_report {
        write_report(&batch, report_path, args.report_format.into())?;
    }

    print_summary(&batch.summary(), elapsed, written.as_deref());
    Ok(())
}

/// Write the completed items as one ZIP. Returns the path if anything was written.
fn write_archive(
    batch: &BatchCoordinator,
    path: &Path,
    compression_level: i64,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(bytes) = batch.build_archive(compression_level)? else {
        tracing::warn!("No images converted successfully; archive not created");
        return Ok(None);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    tracing::info!("Archive written to {:?}", path);
    Ok(Some(path.to_path_buf()))
}

/// Write each completed item into `dir`. Returns `dir` if anything was written.
fn write_files(batch: &BatchCoordinator, dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    let entries = batch.archive_entries();
    if entries.is_empty() {
        tracing::warn!("No images converted successfully; nothing written");
        return Ok(None);
    }
    std::fs::create_dir_all(dir)?;

    let mut taken = HashSet::new();
    for (name, result) in entries {
        let name = unique_name(&name, &taken);
        std::fs::write(dir.join(&name), result.bytes())?;
        tracing::debug!("Wrote {}", name);
        taken.insert(name);
    }
    tracing::info!("{} file(s) written to {:?}", taken.len(), dir);
    Ok(Some(dir.to_path_buf()))
}

/// Write one report entry per item in `format`.
fn write_report(batch: &BatchCoordinator, path: &Path, format: ReportFormat) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut writer = ReportWriter::new(BufWriter::new(file), format, true);
    writer.write_all(&batch.reports())?;
    writer.flush()?;
    tracing::info!("Report of {} item(s) written to {:?}", writer.items_written(), path);
    Ok(())
}

/// Create a progress bar for batch conversion.
fn create_progress_bar(total: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )?
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    Ok(pb)
}

/// Compression ratio as a signed percentage saving, e.g. "-72.4%".
fn ratio_label(summary: &BatchSummary) -> Option<String> {
    summary
        .compression_ratio()
        .map(|ratio| format!("{:+.1}%", (ratio - 1.0) * 100.0))
}

/// Print a formatted summary table after batch conversion.
fn print_summary(summary: &BatchSummary, elapsed: std::time::Duration, written: Option<&Path>) {
    let rate = if elapsed.as_secs_f64() > 0.0 {
        summary.finished() as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!(
        "    Converted:    {:>8}",
        style(summary.completed).green()
    );
    if summary.failed > 0 {
        eprintln!("    Failed:       {:>8}", style(summary.failed).red());
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", summary.total);
    eprintln!("    Input:        {:>12}", format_file_size(summary.original_bytes));
    eprintln!("    Output:       {:>12}", format_file_size(summary.output_bytes));
    if let Some(ratio) = ratio_label(summary) {
        eprintln!("    Size change:  {:>8}", ratio);
    }
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
    if let Some(path) = written {
        eprintln!("    {}", style(path.display()).cyan());
    }
}
