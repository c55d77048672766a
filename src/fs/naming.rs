//! File and folder names derived from remote data.

use crate::dedup::file_name_from_url;
use crate::error::{Error, Result};

/// Characters replaced by `_` in any name we write to disk.
fn is_reserved(c: char) -> bool {
    matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

fn reject_unsafe(name: &str) -> Result<()> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }
    Ok(())
}

fn non_empty(sanitized: String, what: &str) -> Result<String> {
    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(format!(
            "{} cannot be empty or whitespace-only",
            what
        )));
    }
    Ok(sanitized)
}

/// Validate a single file name, replacing reserved characters.
///
/// Separators are rejected rather than replaced: a name taken from a URL
/// should never contain one.
pub fn sanitize_filename(name: &str) -> Result<String> {
    reject_unsafe(name)?;
    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized = name
        .chars()
        .map(|c| if is_reserved(c) { '_' } else { c })
        .collect();
    non_empty(sanitized, "Filename")
}

/// Sanitize a folder name such as an account handle.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    reject_unsafe(name)?;

    let sanitized = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || is_reserved(c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    non_empty(sanitized, "Path component")
}

/// Local file name for a media URL: its last path segment without query
/// or `:quality` marker.
pub fn media_file_name(url: &str) -> Result<String> {
    sanitize_filename(file_name_from_url(url))
}
