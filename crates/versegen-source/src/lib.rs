//! Corpus source loading.
//!
//! Reads the corpus JSON from a local cache file when one is available and
//! otherwise walks a list of remote mirrors, one request at a time.

pub mod loader;

pub use loader::{Loaded, Origin, SourceConfig, SourceError, SourceLoader};
