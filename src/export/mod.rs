//! Tabular export of crawled tweet metadata.

pub mod csv;

pub use self::csv::{
    append_rows, exported_keys, ExportKey, ExportRow, DEFAULT_EXPORT_FILE, EXPORT_HEADER,
};
