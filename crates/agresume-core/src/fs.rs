//! Filesystem probes that never fail.
//!
//! Log stores belong to other tools and may be missing, half-written or
//! unreadable at any time; every helper here maps absence to an empty/false
//! result instead of an error.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub fn path_exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

pub fn is_dir(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_dir())
}

/// Entries of `dir`, sorted by path. Empty when the directory is unreadable.
pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    paths
}

pub fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Order files newest-first by modification time; files without a readable
/// mtime go last
pub fn rank_by_modified(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort_by_cached_key(|path| Reverse(modified_time(path)));
    paths
}

/// Final path component as a string, or an empty string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
