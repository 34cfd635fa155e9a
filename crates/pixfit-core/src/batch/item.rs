//! Per-input records tracked by the batch coordinator.

use std::fmt;

use crate::types::EncodedResult;

/// Identity of an item within one coordinator, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Conversion state of one item. Each state carries only its own data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Processing,
    Completed(EncodedResult),
    Failed(String),
}

impl ItemStatus {
    /// Short lowercase label, as used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Processing => "processing",
            ItemStatus::Completed(_) => "completed",
            ItemStatus::Failed(_) => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ItemStatus::Pending)
    }
}

/// One input file and its conversion state.
#[derive(Debug, Clone)]
pub struct FileItem {
    id: ItemId,
    name: String,
    original_size: u64,
    source: Vec<u8>,
    status: ItemStatus,
}

impl FileItem {
    pub(crate) fn new(id: ItemId, name: String, source: Vec<u8>) -> Self {
        Self {
            id,
            name,
            original_size: source.len() as u64,
            source,
            status: ItemStatus::Pending,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Original file name, extension included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the input in bytes.
    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    pub fn status(&self) -> &ItemStatus {
        &self.status
    }

    /// The encoded output, if conversion completed.
    pub fn result(&self) -> Option<&EncodedResult> {
        match &self.status {
            ItemStatus::Completed(result) => Some(result),
            _ => None,
        }
    }

    /// The failure message, if conversion failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ItemStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Move to `Processing` and hand over the source bytes.
    ///
    /// Source bytes are only needed once, so they are released here.
    pub(crate) fn start(&mut self) -> Vec<u8> {
        self.status = ItemStatus::Processing;
        std::mem::take(&mut self.source)
    }

    pub(crate) fn finish(&mut self, status: ItemStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputFormat;

    #[test]
    fn test_new_item_is_pending() {
        let item = FileItem::new(ItemId(1), "a.jpg".into(), vec![1, 2, 3]);
        assert!(item.status().is_pending());
        assert_eq!(item.original_size(), 3);
        assert!(item.result().is_none());
        assert!(item.error().is_none());
    }

    #[test]
    fn test_start_releases_source() {
        let mut item = FileItem::new(ItemId(1), "a.jpg".into(), vec![1, 2, 3]);
        assert_eq!(item.start(), vec![1, 2, 3]);
        assert_eq!(item.status().label(), "processing");
        // Original size survives the hand-off
        assert_eq!(item.original_size(), 3);
        assert!(item.source.is_empty());
    }

    #[test]
    fn test_finish_states() {
        let mut item = FileItem::new(ItemId(2), "b.jpg".into(), vec![0]);
        item.finish(ItemStatus::Failed("bad header".into()));
        assert_eq!(item.error(), Some("bad header"));
        assert_eq!(item.status().label(), "failed");

        let result = EncodedResult::new(vec![9; 4], OutputFormat::Png, 16, 16);
        item.finish(ItemStatus::Completed(result.clone()));
        assert_eq!(item.result(), Some(&result));
        assert!(item.error().is_none());
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId(7).to_string(), "#7");
    }
}
