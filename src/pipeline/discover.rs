//! Listing document discovery on the local filesystem.

use crate::error::{LqsError, Result};
use crate::versions::FileDescriptor;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::SystemTime;

/// Check whether a path names a JSON document.
pub(crate) fn is_document_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.to_lowercase().ends_with(".json"))
}

/// Recursively collect `*.json` files under `root`.
///
/// Keys are `/`-separated paths relative to `root`, sorted so that discovery
/// order is stable across platforms. Unreadable subdirectories are skipped
/// with a warning; an unreadable root is an error. Directory symlinks are not
/// followed; symlinked files are.
pub fn discover_files(root: &Path) -> Result<Vec<FileDescriptor>> {
    let entries = std::fs::read_dir(root).map_err(|e| LqsError::io(root, e))?;
    let mut files = Vec::new();
    scan_dir(root, entries, &mut files);
    files.sort_by(|a, b| a.key.cmp(&b.key));
    tracing::debug!("Discovered {} document(s) under {}", files.len(), root.display());
    Ok(files)
}

fn scan_dir(root: &Path, entries: std::fs::ReadDir, out: &mut Vec<FileDescriptor>) {
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            match std::fs::read_dir(&path) {
                Ok(sub) => scan_dir(root, sub, out),
                Err(e) => tracing::warn!("Cannot read directory {}: {}", path.display(), e),
            }
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!("Not following directory symlink {}", path.display());
        } else if is_document_file(&path) {
            match describe_file(root, &path) {
                Ok(file) => out.push(file),
                Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
            }
        }
    }
}

/// Build a descriptor for one file, keyed relative to `root`.
pub fn describe_file(root: &Path, path: &Path) -> Result<FileDescriptor> {
    let meta = std::fs::metadata(path).map_err(|e| LqsError::io(path, e))?;
    let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    Ok(FileDescriptor::from_key(
        relative_key(root, path),
        meta.len(),
        DateTime::<Utc>::from(modified),
    ))
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
