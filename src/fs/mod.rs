//! Filesystem module.
//!
//! Provides:
//! - Account folder and data file locations
//! - Safe file names for downloaded media

pub mod naming;
pub mod paths;

pub use naming::{media_file_name, sanitize_filename, sanitize_path_component};
pub use paths::{account_folder, resolve_in_download_dir};
