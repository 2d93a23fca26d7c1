//! Bible corpus normalization and indexing.
//!
//! This crate turns a parsed JSON corpus of unknown shape into a canonical
//! book/chapter/verse index and derives the site's address space from it.

pub mod address;
pub mod books;
pub mod coerce;
pub mod index;
pub mod ingest;
pub mod record;
pub mod shape;

pub use address::{first_address, pages, sitemap_addresses, Address, PageEntry};
pub use books::{normalize_book, Book, BookToken, BOOKS};
pub use index::{CorpusIndex, IndexedVerse};
pub use ingest::{ingest, CorpusError, Ingested};
pub use record::VerseRecord;
pub use shape::{flatten, Shape};
