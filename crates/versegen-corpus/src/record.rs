//! Flattened verse records.

use crate::books::{normalize_book, BookToken};

/// One verse of source text after flattening.
///
/// `book` is whatever the normalizer produced and may not be canonical;
/// `chapter` and `verse` are `0` when the source value was not a positive
/// integer. The indexer discards both kinds of record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl VerseRecord {
    /// Build a record, normalizing the book token and trimming the text.
    pub fn new(book: &BookToken, chapter: u32, verse: u32, text: &str) -> Self {
        Self {
            book: normalize_book(book),
            chapter,
            verse,
            text: text.trim().to_string(),
        }
    }
}
