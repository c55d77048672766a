//! Deduplication module.
//!
//! Provides:
//! - URL canonicalization (query and fragment stripping)
//! - The persisted ledger of downloaded media URLs

pub mod canonical;
pub mod ledger;

pub use canonical::{canonicalize, file_name_from_url, strip_quality_suffix, with_original_quality};
pub use ledger::{DedupStore, DEFAULT_LEDGER_FILE};
