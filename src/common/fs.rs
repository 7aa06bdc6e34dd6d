use std::path::Path;

use anyhow::{Result, bail};

/// Error unless `path` is an existing directory.
pub fn require_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("directory does not exist: {}", path.display());
    }
    if !path.is_dir() {
        bail!("path exists but is not a directory: {}", path.display());
    }
    Ok(())
}

/// Error unless `path` is an existing file.
pub fn require_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("file does not exist: {}", path.display());
    }
    if !path.is_file() {
        bail!("path exists but is not a file: {}", path.display());
    }
    Ok(())
}
