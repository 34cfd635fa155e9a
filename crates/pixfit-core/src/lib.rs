//! Pixfit Core - Embeddable batch image conversion library.
//!
//! Pixfit fits images onto a fixed-size canvas with aspect-preserving
//! "contain" scaling, re-encodes them as WebP, PNG, or JPEG, and packages the
//! results into a ZIP archive. Everything runs locally.
//!
//! # Architecture
//!
//! ```text
//! Bytes → Validate → Decode → Contain-fit placement → Canvas → Encode → Archive
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pixfit_core::{BatchCoordinator, NoopReporter, ProcessingOptions};
//!
//! #[tokio::main]
//! async fn main() -> pixfit_core::Result<()> {
//!     let mut batch = BatchCoordinator::new(ProcessingOptions::new(200, 200))?;
//!     batch.add_path("./photo.jpg".as_ref())?;
//!     batch.process_pending(&NoopReporter).await;
//!
//!     if let Some(zip) = batch.build_archive(6)? {
//!         std::fs::write(pixfit_core::archive::DEFAULT_ARCHIVE_NAME, zip)?;
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod archive;
pub mod batch;
pub mod config;
pub mod error;
pub mod report;
pub mod transform;
pub mod types;

// Re-exports for convenient access
pub use archive::{build_archive, output_file_name, ArchiveBuilder, DEFAULT_ARCHIVE_NAME};
pub use batch::{
    BatchCoordinator, BatchSummary, FileItem, ItemId, ItemStatus, NoopReporter, ProgressReporter,
};
pub use config::Config;
pub use error::{ArchiveError, ConfigError, ConvertError, ConvertResult, PixfitError, Result};
pub use report::{format_file_size, ItemReport, ReportFormat, ReportWriter};
pub use transform::{
    contain_placement, convert, convert_bytes, Converter, DiscoveredFile, FileDiscovery,
    Placement, SourceImage,
};
pub use types::{BackgroundFill, EncodedResult, InputAcceptance, OutputFormat, ProcessingOptions};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
