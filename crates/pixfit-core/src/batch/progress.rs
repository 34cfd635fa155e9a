//! Progress callbacks for batch conversion.

use super::item::FileItem;

/// Receives progress notifications from [`BatchCoordinator::process_pending`].
///
/// Both methods default to doing nothing, so implementors override only
/// what they display.
///
/// [`BatchCoordinator::process_pending`]: super::BatchCoordinator::process_pending
pub trait ProgressReporter: Send + Sync {
    /// Called after an item is marked `Processing`.
    fn item_started(&self, _item: &FileItem) {}

    /// Called after an item reaches `Completed` or `Failed`.
    ///
    /// `done` counts finished items of this run, failures included; `total`
    /// is the number of items that were pending when the run began.
    fn item_finished(&self, _item: &FileItem, _done: usize, _total: usize) {}
}

/// Reporter that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {}
