//! Sequential batch conversion over a list of file items.

use std::path::Path;

use crate::archive::{self, output_file_name};
use crate::config::LimitsConfig;
use crate::error::{ArchiveError, ConvertError, ConvertResult};
use crate::report::ItemReport;
use crate::transform::Converter;
use crate::types::{EncodedResult, ProcessingOptions};

use super::item::{FileItem, ItemId, ItemStatus};
use super::progress::ProgressReporter;

/// Owns the items of one session and converts them one at a time.
pub struct BatchCoordinator {
    converter: Converter,
    items: Vec<FileItem>,
    next_id: u64,
}

/// Aggregate counts over all items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
    /// Input bytes of completed items
    pub original_bytes: u64,
    /// Output bytes of completed items
    pub output_bytes: u64,
}

impl BatchSummary {
    /// Output size as a fraction of input size over completed items.
    pub fn compression_ratio(&self) -> Option<f64> {
        (self.original_bytes > 0).then(|| self.output_bytes as f64 / self.original_bytes as f64)
    }

    /// Items that reached a final state.
    pub fn finished(&self) -> usize {
        self.completed + self.failed
    }
}

impl BatchCoordinator {
    /// Create a coordinator with default limits.
    pub fn new(options: ProcessingOptions) -> ConvertResult<Self> {
        Ok(Self::with_converter(Converter::new(
            options,
            LimitsConfig::default(),
        )?))
    }

    pub fn with_converter(converter: Converter) -> Self {
        Self {
            converter,
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn options(&self) -> &ProcessingOptions {
        self.converter.options()
    }

    /// Queue an in-memory file.
    pub fn add_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(FileItem::new(id, name.into(), bytes));
        id
    }

    /// Read a file from disk and queue it under its file name.
    ///
    /// Missing or oversized files are rejected before any bytes are read.
    pub fn add_path(&mut self, path: &Path) -> ConvertResult<ItemId> {
        self.converter.check_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| ConvertError::Decode {
            name: name.clone(),
            message: format!("Cannot read file: {e}"),
        })?;
        Ok(self.add_file(name, bytes))
    }

    pub fn items(&self) -> &[FileItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&FileItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every pending item in insertion order.
    ///
    /// A failing item is recorded as `Failed` and the run continues.
    /// Returns the number of items processed.
    pub async fn process_pending(&mut self, reporter: &dyn ProgressReporter) -> usize {
        let pending: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.status().is_pending())
            .map(|(idx, _)| idx)
            .collect();
        let total = pending.len();
        tracing::debug!("Processing {} pending items", total);

        for (done, idx) in pending.into_iter().enumerate() {
            let item = &mut self.items[idx];
            let bytes = item.start();
            reporter.item_started(item);

            let status = match self.converter.convert_bytes(bytes, item.name()).await {
                Ok(result) => ItemStatus::Completed(result),
                Err(e) => {
                    tracing::warn!("Failed: {} {} - {}", item.id(), item.name(), e);
                    ItemStatus::Failed(e.to_string())
                }
            };
            item.finish(status);
            reporter.item_finished(item, done + 1, total);
        }
        total
    }

    pub fn summary(&self) -> BatchSummary {
        self.items
            .iter()
            .fold(BatchSummary::default(), |mut summary, item| {
                summary.total += 1;
                match item.status() {
                    ItemStatus::Pending | ItemStatus::Processing => summary.pending += 1,
                    ItemStatus::Completed(result) => {
                        summary.completed += 1;
                        summary.original_bytes += item.original_size();
                        summary.output_bytes += result.len();
                    }
                    ItemStatus::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }

    /// Discard every item.
    pub fn clear(&mut self) {
        tracing::debug!("Clearing {} items", self.items.len());
        self.items.clear();
    }

    /// Output names and results of completed items, in insertion order.
    pub fn archive_entries(&self) -> Vec<(String, &EncodedResult)> {
        self.items
            .iter()
            .filter_map(|item| {
                item.result().map(|result| {
                    let (width, height) = result.dimensions();
                    (
                        output_file_name(item.name(), width, height, result.format()),
                        result,
                    )
                })
            })
            .collect()
    }

    /// Package completed items into a ZIP archive.
    ///
    /// Returns `Ok(None)` when nothing has completed.
    pub fn build_archive(&self, compression_level: i64) -> Result<Option<Vec<u8>>, ArchiveError> {
        let entries = self.archive_entries();
        archive::build_archive(
            entries
                .into_iter()
                .map(|(name, result)| (name, result.bytes())),
            compression_level,
        )
    }

    /// Per-item records for reporting.
    pub fn reports(&self) -> Vec<ItemReport> {
        self.items.iter().map(ItemReport::from_item).collect()
    }
}
