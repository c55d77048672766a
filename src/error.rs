//! Error types for the twitter-media-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // Download errors
    #[error("Failed to fetch {url} after {attempts} attempt(s): {message}")]
    AssetFetch {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    // Response parsing errors (recovered locally, never abort a crawl)
    #[error("Unexpected response shape: {0}")]
    Parse(String),

    // Ledger / export errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found in ledger: {0}")]
    NotFound(String),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    #[error("Run interrupted")]
    Interrupted,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from the ledger or export files.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::NotFound(_) | Error::Csv(_))
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const STORAGE_ERROR: i32 = 5;
    pub const UNEXPECTED_ERROR: i32 = 6;
    pub const SOME_USERS_FAILED: i32 = 7;
}
