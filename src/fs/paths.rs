//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Folder an account's media is saved into: `<download_dir>/<handle>`.
pub fn account_folder(config: &Config, handle: &str) -> Result<PathBuf> {
    let folder = sanitize_path_component(handle.trim_start_matches('@'))?;
    Ok(config.download_directory().join(folder))
}

/// Resolve a configured file path against the download directory.
///
/// Absolute paths are kept as given.
pub fn resolve_in_download_dir(config: &Config, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config.download_directory().join(path)
    }
}
