//! Persistent ledger of downloaded media URLs.
//!
//! The ledger is one JSON object mapping canonical URLs to `true`. It is
//! shared by every download worker of a run behind a single lock and written
//! back in full at the end of each crawl.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// Default ledger location, relative to the download directory.
pub const DEFAULT_LEDGER_FILE: &str = "log.json";

/// Set of canonical URLs that have already been downloaded.
#[derive(Debug)]
pub struct DedupStore {
    path: PathBuf,
    urls: RwLock<HashSet<String>>,
}

impl DedupStore {
    /// Create an empty store backed by `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            urls: RwLock::new(HashSet::new()),
        }
    }

    /// Create a store and load it, starting empty if the file is missing or
    /// unreadable.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        match store.load().await {
            Ok(()) => tracing::debug!(
                "Loaded {} ledger entries from {}",
                store.len().await,
                store.path.display()
            ),
            Err(e) => tracing::info!("Starting with an empty ledger: {}", e),
        }
        store
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a canonical URL has been downloaded.
    pub async fn exists(&self, url: &str) -> bool {
        self.urls.read().await.contains(url)
    }

    /// Record a canonical URL. Returns `false` if it was already present.
    pub async fn add(&self, url: &str) -> bool {
        self.urls.write().await.insert(url.to_string())
    }

    /// Forget a canonical URL.
    pub async fn remove(&self, url: &str) -> Result<()> {
        if self.urls.write().await.remove(url) {
            Ok(())
        } else {
            Err(Error::NotFound(url.to_string()))
        }
    }

    pub async fn len(&self) -> usize {
        self.urls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.urls.read().await.is_empty()
    }

    /// Write the whole set to the backing file, replacing its contents.
    pub async fn persist(&self) -> Result<()> {
        let content = {
            let urls = self.urls.read().await;
            let entries: BTreeMap<&str, bool> = urls.iter().map(|u| (u.as_str(), true)).collect();
            serde_json::to_vec_pretty(&entries)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::Storage(format!(
                    "Failed to create ledger directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to write ledger {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to replace ledger {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!("Persisted ledger to {}", self.path.display());
        Ok(())
    }

    /// Replace the in-memory set with the backing file's contents.
    ///
    /// On error the in-memory set is left untouched.
    pub async fn load(&self) -> Result<()> {
        let content = fs::read(&self.path).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to read ledger {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let entries: HashMap<String, bool> = serde_json::from_slice(&content).map_err(|e| {
            Error::Storage(format!(
                "Malformed ledger {}: {}",
                self.path.display(),
                e
            ))
        })?;

        *self.urls.write().await = entries.into_keys().collect();
        Ok(())
    }
}
