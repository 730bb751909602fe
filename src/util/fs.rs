//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Remove a directory and all its contents, if it exists.
///
/// Returns whether anything was removed.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path)
        .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    Ok(true)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Check whether a CMake build directory has been configured.
pub fn is_configured(build_dir: &Path) -> bool {
    build_dir.join("CMakeCache.txt").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_and_remove() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build/Debug");

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());

        assert!(remove_dir_all_if_exists(&dir).unwrap());
        assert!(!dir.exists());
        assert!(!remove_dir_all_if_exists(&dir).unwrap());
    }

    #[test]
    fn test_is_configured() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_configured(tmp.path()));

        std::fs::write(tmp.path().join("CMakeCache.txt"), "").unwrap();
        assert!(is_configured(tmp.path()));
    }
}
