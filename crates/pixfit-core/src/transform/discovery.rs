//! File discovery for finding convertible images on disk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::accept::is_accepted;
use crate::types::InputAcceptance;

/// Discovers accepted image files in files and directories.
pub struct FileDiscovery {
    mode: InputAcceptance,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(mode: InputAcceptance) -> Self {
        Self { mode }
    }

    /// Discover all accepted image files at a path.
    ///
    /// If path is a file, returns it if accepted.
    /// If path is a directory, recursively finds all accepted files.
    pub fn discover(&self, path: &Path) -> Vec<DiscoveredFile> {
        if path.is_file() {
            if self.is_supported(path) {
                if let Ok(meta) = std::fs::metadata(path) {
                    return vec![DiscoveredFile {
                        path: path.to_path_buf(),
                        size: meta.len(),
                    }];
                }
            }
            return vec![];
        }

        let mut files: Vec<DiscoveredFile> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && self.is_supported(entry.path()))
            .filter_map(|entry| {
                entry.metadata().ok().map(|meta| DiscoveredFile {
                    path: entry.path().to_path_buf(),
                    size: meta.len(),
                })
            })
            .collect();

        // Sort by path for deterministic ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    /// Discover across several inputs, keeping input order and dropping duplicates.
    pub fn discover_all(&self, paths: &[PathBuf]) -> Vec<DiscoveredFile> {
        let mut seen = std::collections::HashSet::new();
        paths
            .iter()
            .flat_map(|p| self.discover(p))
            .filter(|f| seen.insert(f.path.clone()))
            .collect()
    }

    /// Files on disk carry no MIME type, so only the extension is checked.
    fn is_supported(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| is_accepted(None, name, self.mode))
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_jpeg_only() {
        let discovery = FileDiscovery::new(InputAcceptance::Jpeg);

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(!discovery.is_supported(Path::new("test.png")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
    }

    #[test]
    fn test_is_supported_extended() {
        let discovery = FileDiscovery::new(InputAcceptance::Extended);

        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(discovery.is_supported(Path::new("test.webp")));
        assert!(discovery.is_supported(Path::new("test.gif")));
        assert!(!discovery.is_supported(Path::new("test.pdf")));
    }

    #[test]
    fn test_discover_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"xx").unwrap();
        std::fs::write(dir.path().join("a.JPEG"), b"x").unwrap();
        std::fs::write(dir.path().join("nested/c.jpg"), b"xxx").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let files = FileDiscovery::new(InputAcceptance::Jpeg).discover(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.JPEG"),
                PathBuf::from("b.jpg"),
                PathBuf::from("nested/c.jpg")
            ]
        );
        assert_eq!(FileDiscovery::total_size(&files), 6);
    }

    #[test]
    fn test_discover_all_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.jpg");
        std::fs::write(&file, b"x").unwrap();

        let files = FileDiscovery::new(InputAcceptance::Jpeg)
            .discover_all(&[file.clone(), dir.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, file);
    }

    #[test]
    fn test_total_size() {
        let files = vec![
            DiscoveredFile {
                path: PathBuf::from("a.jpg"),
                size: 100,
            },
            DiscoveredFile {
                path: PathBuf::from("b.jpg"),
                size: 200,
            },
        ];

        assert_eq!(FileDiscovery::total_size(&files), 300);
    }
}
