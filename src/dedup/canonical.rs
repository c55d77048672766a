//! URL canonicalization for ledger keys and file naming.

/// Marker requesting the original (largest) rendition of an image.
pub const ORIGINAL_QUALITY_SUFFIX: &str = ":orig";

/// Strip the query string and fragment from a URL.
///
/// Two URLs that differ only after the first `?` or `#` are the same asset.
pub fn canonicalize(url: &str) -> &str {
    match url.find(|c: char| c == '?' || c == '#') {
        Some(pos) => &url[..pos],
        None => url,
    }
}

/// Request the original-quality rendition of an image URL.
pub fn with_original_quality(url: &str) -> String {
    format!("{}{}", url, ORIGINAL_QUALITY_SUFFIX)
}

/// Remove a `:name` quality marker from the end of a path segment.
pub fn strip_quality_suffix(segment: &str) -> &str {
    match segment.rfind(':') {
        Some(pos) => &segment[..pos],
        None => segment,
    }
}

/// The file name a media URL is saved under: its last path segment without
/// query, fragment or quality marker.
pub fn file_name_from_url(url: &str) -> &str {
    let path = canonicalize(url);
    let last = path.rsplit('/').next().unwrap_or(path);
    strip_quality_suffix(last)
}
