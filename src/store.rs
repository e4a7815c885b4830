//! File access behind the editor's [`FileStore`] trait.
//!
//! [`FsStore`] reads and writes real files; saves go through a temporary file in
//! the target directory that is synced and then renamed over the original, so a
//! failed save never leaves a truncated document behind. [`MemoryStore`] keeps
//! files in a map for tests and headless use.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::editor::FileStore;
use crate::error::{DimError, Result};

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> DimError + '_ {
    move |source| DimError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Refuse device files, pipes and sockets, which would hang or never end
fn reject_special_file(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if let Ok(metadata) = fs::metadata(path) {
            let ft = metadata.file_type();
            let kind = if ft.is_char_device() {
                Some("character device")
            } else if ft.is_block_device() {
                Some("block device")
            } else if ft.is_fifo() {
                Some("named pipe")
            } else if ft.is_socket() {
                Some("socket")
            } else {
                None
            };
            if let Some(kind) = kind {
                return Err(DimError::Io {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, format!("cannot edit a {kind}")),
                });
            }
        }
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Directory a temporary file for `path` is created in
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

// ==================== Filesystem ====================

#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        reject_special_file(path)?;
        let bytes = fs::read(path).map_err(io_error(path))?;
        String::from_utf8(bytes).map_err(|_| DimError::Encoding {
            path: path.to_path_buf(),
        })
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        reject_special_file(path)?;
        let mut temp = NamedTempFile::new_in(parent_dir(path)).map_err(io_error(path))?;
        temp.write_all(text.as_bytes()).map_err(io_error(path))?;
        // keep the original file's mode instead of the temp file's private one
        if let Ok(metadata) = fs::metadata(path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(io_error(path))?;
        }
        temp.as_file().sync_all().map_err(io_error(path))?;
        temp.persist(path).map_err(|err| DimError::Io {
            path: path.to_path_buf(),
            source: err.error,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "wrote file");
        Ok(())
    }

    fn create(&mut self, path: &Path) -> Result<()> {
        let create_error = |source| DimError::CreateFile {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(create_error)?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(create_error)?;
        Ok(())
    }

    fn basename(&self, path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

// ==================== In-memory ====================

/// A `FileStore` over a map of path to contents
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.files.remove(path)
    }

    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }
}

impl FileStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| DimError::Io {
            path: path.to_path_buf(),
            source: io::ErrorKind::NotFound.into(),
        })
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn create(&mut self, path: &Path) -> Result<()> {
        self.files.entry(path.to_path_buf()).or_default();
        Ok(())
    }

    fn basename(&self, path: &Path) -> String {
        FsStore.basename(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        let store = FsStore::new();
        assert_eq!(store.basename(Path::new("/tmp/dir/notes.txt")), "notes.txt");
        assert_eq!(store.basename(Path::new("plain")), "plain");
    }

    #[test]
    fn test_parent_dir_of_bare_name_is_cwd() {
        assert_eq!(parent_dir(Path::new("file.txt")), Path::new("."));
        assert_eq!(parent_dir(Path::new("a/b.txt")), Path::new("a"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        let path = Path::new("doc.txt");
        assert!(!store.exists(path));
        assert!(matches!(store.read_text(path), Err(DimError::Io { .. })));

        store.create(path).unwrap();
        assert_eq!(store.file(path), Some(""));
        store.write_text(path, "body").unwrap();
        // create on an existing file keeps its content
        store.create(path).unwrap();
        assert_eq!(store.read_text(path).unwrap(), "body");
    }

    #[cfg(unix)]
    #[test]
    fn test_device_files_are_rejected() {
        let err = FsStore.read_text(Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, DimError::Io { .. }));
    }
}
