//! Per-item conversion reports and a JSON / JSONL writer for them.

use serde::Serialize;
use std::io::{self, Write};

use crate::archive::output_file_name;
use crate::batch::{FileItem, ItemStatus};

/// One line of a conversion report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub status: &'static str,
    pub original_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemReport {
    pub fn from_item(item: &FileItem) -> Self {
        let (output_size, output_name) = match item.status() {
            ItemStatus::Completed(result) => {
                let (width, height) = result.dimensions();
                (
                    Some(result.len()),
                    Some(output_file_name(item.name(), width, height, result.format())),
                )
            }
            _ => (None, None),
        };
        Self {
            name: item.name().to_string(),
            status: item.status().label(),
            original_size: item.original_size(),
            output_size,
            output_name,
            error: item.error().map(str::to_string),
        }
    }
}

/// Report serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Single JSON object or array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

/// Serializes reports as JSON (one array) or JSONL (one object per line).
pub struct ReportWriter<W: Write> {
    writer: W,
    format: ReportFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Create a writer. `pretty` only affects the JSON format.
    pub fn new(writer: W, format: ReportFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write one report as a standalone object (JSON) or line (JSONL).
    pub fn write(&mut self, report: &ItemReport) -> io::Result<()> {
        let pretty = self.pretty && self.format == ReportFormat::Json;
        self.emit(report, pretty)?;
        self.items_written += 1;
        Ok(())
    }

    /// Write a batch: a single array for JSON, one line per report for JSONL.
    pub fn write_all(&mut self, reports: &[ItemReport]) -> io::Result<()> {
        match self.format {
            ReportFormat::Json => {
                self.emit(reports, self.pretty)?;
                self.items_written += reports.len();
            }
            ReportFormat::JsonLines => {
                for report in reports {
                    self.write(report)?;
                }
            }
        }
        Ok(())
    }

    pub fn items_written(&self) -> usize {
        self.items_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn emit<T: Serialize + ?Sized>(&mut self, value: &T, pretty: bool) -> io::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut self.writer, value).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, value).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size with 1024-based units and at most two decimals.
///
/// ```
/// use pixfit_core::report::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ItemId;

    fn failed_item() -> FileItem {
        let mut item = FileItem::new(ItemId(1), "broken.jpg".into(), vec![0; 12]);
        item.start();
        item.finish(ItemStatus::Failed("Decode error for broken.jpg: eof".into()));
        item
    }

    fn pending_report(name: &str) -> ItemReport {
        ItemReport::from_item(&FileItem::new(ItemId(2), name.into(), vec![0; 5]))
    }

    #[test]
    fn test_report_from_failed_item() {
        let report = ItemReport::from_item(&failed_item());
        assert_eq!(report.status, "failed");
        assert_eq!(report.original_size, 12);
        assert_eq!(report.output_name, None);
        assert!(report.error.unwrap().contains("eof"));
    }

    #[test]
    fn test_write_json_skips_empty_fields() {
        let mut buffer = Vec::new();
        let mut writer = ReportWriter::new(&mut buffer, ReportFormat::Json, false);
        writer.write(&pending_report("a.jpg")).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output.trim(),
            r#"{"name":"a.jpg","status":"pending","original_size":5}"#
        );
    }

    #[test]
    fn test_write_all_jsonl() {
        let mut buffer = Vec::new();
        let mut writer = ReportWriter::new(&mut buffer, ReportFormat::JsonLines, true);
        writer
            .write_all(&[pending_report("a.jpg"), pending_report("b.jpg")])
            .unwrap();
        assert_eq!(writer.items_written(), 2);

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("b.jpg"));
    }

    #[test]
    fn test_write_all_json_array() {
        let mut buffer = Vec::new();
        let mut writer = ReportWriter::new(&mut buffer, ReportFormat::Json, true);
        writer
            .write_all(&[pending_report("a.jpg"), ItemReport::from_item(&failed_item())])
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["status"], "failed");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1234), "1.21 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(5 * 1024u64.pow(4)), "5120 GB");
    }
}
