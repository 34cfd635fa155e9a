//! ZIP packaging for converted images.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ArchiveError;
use crate::types::OutputFormat;

/// File name used when no archive name is configured.
pub const DEFAULT_ARCHIVE_NAME: &str = "converted-images.zip";

/// Strip the last extension from a file name.
///
/// Names without a dot, and names whose only dot is the leading one
/// (`.profile`), are returned whole.
///
/// ```
/// use pixfit_core::archive::strip_extension;
///
/// assert_eq!(strip_extension("photo.jpg"), "photo");
/// assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
/// assert_eq!(strip_extension("README"), "README");
/// ```
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Name of the converted output for `original`.
///
/// ```
/// use pixfit_core::archive::output_file_name;
/// use pixfit_core::OutputFormat;
///
/// assert_eq!(
///     output_file_name("photo.jpg", 200, 200, OutputFormat::Webp),
///     "photo_200x200.webp"
/// );
/// ```
pub fn output_file_name(original: &str, width: u32, height: u32, format: OutputFormat) -> String {
    format!(
        "{}_{}x{}.{}",
        strip_extension(original),
        width,
        height,
        format.extension()
    )
}

/// In-memory ZIP writer.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    names: HashSet<String>,
}

impl ArchiveBuilder {
    /// Create a builder using deflate at `compression_level` (1-9).
    /// Level 0 stores entries uncompressed.
    pub fn new(compression_level: i64) -> Self {
        let options = if compression_level <= 0 {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(compression_level))
        };
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            names: HashSet::new(),
        }
    }

    /// Add one entry. Returns the name actually used, which differs from
    /// `name` when an entry with that name already exists.
    pub fn add(&mut self, name: &str, data: &[u8]) -> Result<String, ArchiveError> {
        let entry_name = unique_name(name, &self.names);
        self.writer.start_file(entry_name.as_str(), self.options)?;
        self.writer.write_all(data)?;
        tracing::trace!("Archived {} ({} bytes)", entry_name, data.len());
        self.names.insert(entry_name.clone());
        Ok(entry_name)
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Finish the central directory and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>, ArchiveError> {
        Ok(self.writer.finish()?.into_inner())
    }
}

/// `name`, or `name` with a `-{n}` suffix before the extension if it is
/// already in `taken`.
pub fn unique_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }
    let stem = strip_extension(name);
    let ext = &name[stem.len()..];
    (2..)
        .map(|n| format!("{stem}-{n}{ext}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Package `(file_name, bytes)` pairs into one archive.
///
/// An empty entry list produces no archive.
pub fn build_archive<'a, I>(entries: I, compression_level: i64) -> Result<Option<Vec<u8>>, ArchiveError>
where
    I: IntoIterator<Item = (String, &'a [u8])>,
{
    let mut builder = ArchiveBuilder::new(compression_level);
    for (name, data) in entries {
        builder.add(&name, data)?;
    }
    if builder.is_empty() {
        return Ok(None);
    }
    let count = builder.len();
    let bytes = builder.finish()?;
    tracing::debug!("Built archive with {} entries ({} bytes)", count, bytes.len());
    Ok(Some(bytes))
}
