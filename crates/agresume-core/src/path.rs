use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    } else if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

// HOME wins over the platform lookup so tests can point it at a temp dir.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Calculate the project hash Gemini CLI uses to name per-project directories
///
/// This function canonicalizes the path before hashing to ensure consistency
/// across symlinks and different path representations.
/// For example, `/var/folders/...` and `/private/var/folders/...` will produce
/// the same hash on macOS where `/var` is a symlink to `/private/var`.
pub fn project_hash_from_root(project_root: &Path) -> String {
    let normalized = normalize_path(project_root);
    let path_str = normalized.to_string_lossy();

    let mut hasher = Sha256::new();
    hasher.update(path_str.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Normalize a path for comparison (resolve to absolute, canonicalize if possible)
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

/// Check if two paths are equivalent after normalization
pub fn paths_equal(path1: &Path, path2: &Path) -> bool {
    normalize_path(path1) == normalize_path(path2)
}

/// Directory-scoping rule shared by every provider.
///
/// A session recorded in `session_cwd` is visible from `cwd` when the two are
/// equal or one contains the other. Containment is component-wise, so
/// `/work/app` does not contain `/work/app-old`.
pub fn is_within_scope(cwd: &Path, session_cwd: &Path) -> bool {
    if cwd.as_os_str().is_empty() || session_cwd.as_os_str().is_empty() {
        return false;
    }
    cwd.starts_with(session_cwd) || session_cwd.starts_with(cwd)
}

/// Discover project root based on priority:
/// 1. explicit_project_root (--project-root flag)
/// 2. AGRESUME_PROJECT_ROOT environment variable
/// 3. Current working directory
///
/// The result is absolute, so relative roots like `.` scope correctly.
pub fn discover_project_root(explicit_project_root: Option<&str>) -> Result<PathBuf> {
    if let Some(root) = explicit_project_root {
        return Ok(normalize_path(&expand_tilde(root)));
    }

    if let Ok(env_root) = std::env::var("AGRESUME_PROJECT_ROOT")
        && !env_root.is_empty()
    {
        return Ok(normalize_path(&expand_tilde(&env_root)));
    }

    let cwd = std::env::current_dir()?;
    Ok(cwd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_equal_and_nested() {
        let project = Path::new("/work/app");
        assert!(is_within_scope(project, Path::new("/work/app")));
        assert!(is_within_scope(project, Path::new("/work/app/")));
        assert!(is_within_scope(project, Path::new("/work/app/crates/core")));
        assert!(is_within_scope(project, Path::new("/work")));
    }

    #[test]
    fn test_scope_rejects_siblings_and_prefix_lookalikes() {
        let project = Path::new("/work/app");
        assert!(!is_within_scope(project, Path::new("/work/app-old")));
        assert!(!is_within_scope(project, Path::new("/work/other")));
        assert!(!is_within_scope(project, Path::new("/home/app")));
    }

    #[test]
    fn test_scope_root_contains_everything() {
        assert!(is_within_scope(Path::new("/work/app"), Path::new("/")));
        assert!(is_within_scope(Path::new("/"), Path::new("/work/app")));
    }

    #[test]
    fn test_scope_empty_path_never_matches() {
        assert!(!is_within_scope(Path::new("/work/app"), Path::new("")));
        assert!(!is_within_scope(Path::new(""), Path::new("/work/app")));
    }
}
