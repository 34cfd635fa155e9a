//! Batch coordination: per-item status, sequential conversion, progress,
//! and archive hand-off.

pub mod coordinator;
pub mod item;
pub mod progress;

pub use coordinator::{BatchCoordinator, BatchSummary};
pub use item::{FileItem, ItemId, ItemStatus};
pub use progress::{NoopReporter, ProgressReporter};
