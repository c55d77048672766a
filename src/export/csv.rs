//! Append-only CSV record of discovered media.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::Path;

use serde::Serialize;

use crate::api::Account;
use crate::error::{Error, Result};
use crate::media::{MediaItem, TweetRecord};

/// Default export location, relative to the download directory.
pub const DEFAULT_EXPORT_FILE: &str = "record.csv";

/// Header written once, when the export file is created.
pub const EXPORT_HEADER: [&str; 8] = [
    "TweetDate",
    "TweetId",
    "Username",
    "DisplayName",
    "TweetText",
    "TweetURL",
    "MediaType",
    "MediaURL",
];

/// One exported row per discovered media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub date: String,
    pub tweet_id: String,
    pub username: String,
    pub display_name: String,
    pub tweet_text: String,
    pub tweet_url: String,
    pub media_type: String,
    pub media_url: String,
}

impl ExportRow {
    /// Build a row for one media item of a tweet.
    ///
    /// Author columns come from the crawled account so every row of a run
    /// names the same account.
    pub fn new(account: &Account, record: &TweetRecord, media: &MediaItem) -> Self {
        Self {
            date: record.date.clone(),
            tweet_id: record.tweet_id.clone(),
            username: format!("@{}", account.handle),
            display_name: account.display_name.clone(),
            tweet_text: record.text.clone(),
            tweet_url: media.expanded_url.clone(),
            media_type: media.source_type.clone(),
            media_url: media.media_url.clone(),
        }
    }

    /// Identity of the media item a row describes: tweet id and media URL.
    pub fn key(&self) -> ExportKey {
        (self.tweet_id.clone(), self.media_url.clone())
    }
}

/// Tweet id and media URL of one exported row.
pub type ExportKey = (String, String);

/// Keys of every row already in the export file; empty if it does not exist.
pub fn exported_keys(path: &Path) -> Result<HashSet<ExportKey>> {
    let mut keys = HashSet::new();
    if !path.exists() {
        return Ok(keys);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Storage(format!("Failed to open export {}: {}", path.display(), e)))?;

    for record in reader.records() {
        let record = record.map_err(|e| {
            Error::Storage(format!("Malformed export {}: {}", path.display(), e))
        })?;
        if let (Some(tweet_id), Some(media_url)) = (record.get(1), record.get(7)) {
            keys.insert((tweet_id.to_string(), media_url.to_string()));
        }
    }
    Ok(keys)
}

/// Append rows to the export file, writing the header only if the file is new.
pub fn append_rows(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let is_new = !path.exists();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::Storage(format!(
                "Failed to create export directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::Storage(format!("Failed to open export {}: {}", path.display(), e)))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if is_new {
        writer.write_record(EXPORT_HEADER)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .map_err(|e| Error::Storage(format!("Failed to write export {}: {}", path.display(), e)))?;

    tracing::debug!("Appended {} row(s) to {}", rows.len(), path.display());
    Ok(())
}
