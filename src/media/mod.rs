//! Media module for item representation and timeline parsing.

pub mod item;
pub mod parser;

pub use item::{select_best_variant, FileType, MediaItem, MediaKind, MediaVariant, TweetRecord};
pub use parser::{extract, extract_next_cursor, parse_page, parse_source_date};
