//! Directory listing and creation helpers used by the store and the navigator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub path: PathBuf,
    pub name: String,
    /// Extension including the leading dot, empty when there is none
    pub ext: String,
    pub is_dir: bool,
}

/// Lists `dir`, sorted by name so category order is stable between runs.
pub fn read_dir(dir: &Path) -> io::Result<Vec<FsEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let ext = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        entries.push(FsEntry {
            is_dir: entry.file_type()?.is_dir(),
            path,
            name,
            ext,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Names of the visible subdirectories of `dir`
pub fn list_dirs(dir: &Path) -> io::Result<Vec<String>> {
    Ok(read_dir(dir)?
        .into_iter()
        .filter(|entry| entry.is_dir && !entry.name.starts_with('.'))
        .map(|entry| entry.name)
        .collect())
}

/// Creates `dir` and its parents if missing. Idempotent.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
