//! Configuration structures and loading logic.

use crate::api::auth::DEFAULT_BEARER_TOKEN;
use crate::config::modes::DownloadMode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub targets: TargetsConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Session credentials copied from a logged-in browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Full `Cookie` header value; must include `ct0`.
    #[serde(default)]
    pub cookie: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Bearer token of the web client.
    #[serde(default = "default_bearer_token")]
    pub bearer_token: String,
}

/// Accounts to crawl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetsConfig {
    /// Handles crawled in order, with or without a leading `@`.
    #[serde(default)]
    pub usernames: Vec<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Download mode (user, user_list, url_file).
    #[serde(default)]
    pub download_mode: DownloadMode,

    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Ledger of downloaded URLs.
    #[serde(default = "default_ledger_file")]
    pub ledger_file: PathBuf,

    /// CSV record of discovered media.
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    /// JSON array of media URLs for `url_file` mode.
    #[serde(default = "default_url_file")]
    pub url_file: PathBuf,

    /// Simultaneous media fetches per page.
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,

    /// Attempts per media URL before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Tweets requested per timeline page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Whether to show skipped downloads.
    #[serde(default)]
    pub show_skipped_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_mode: DownloadMode::default(),
            download_directory: None,
            ledger_file: default_ledger_file(),
            export_file: default_export_file(),
            url_file: default_url_file(),
            max_concurrent_downloads: default_max_concurrent_downloads(),
            max_attempts: default_max_attempts(),
            page_size: default_page_size(),
            request_timeout_seconds: default_request_timeout(),
            show_downloads: true,
            show_skipped_downloads: false,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            cookie: String::new(),
            user_agent: default_user_agent(),
            bearer_token: default_bearer_token(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36".to_string()
}

fn default_bearer_token() -> String {
    DEFAULT_BEARER_TOKEN.to_string()
}

fn default_ledger_file() -> PathBuf {
    PathBuf::from(crate::dedup::DEFAULT_LEDGER_FILE)
}

fn default_export_file() -> PathBuf {
    PathBuf::from(crate::export::DEFAULT_EXPORT_FILE)
}

fn default_url_file() -> PathBuf {
    PathBuf::from("urls.json")
}

fn default_max_concurrent_downloads() -> usize {
    crate::download::context::DEFAULT_MAX_CONCURRENT_DOWNLOADS
}

fn default_max_attempts() -> u32 {
    crate::download::context::DEFAULT_MAX_ATTEMPTS
}

fn default_page_size() -> u32 {
    crate::api::DEFAULT_PAGE_SIZE
}

fn default_request_timeout() -> u64 {
    crate::api::client::DEFAULT_TIMEOUT_SECONDS
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}
