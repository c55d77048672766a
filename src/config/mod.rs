//! Configuration module for the twitter-media-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Download mode selection
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig, TargetsConfig};
pub use modes::DownloadMode;
pub use validation::{normalize_usernames, validate_config, validate_cookie};
