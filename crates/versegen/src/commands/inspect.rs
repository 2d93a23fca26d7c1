//! Report what the corpus contains without writing a site.

use std::path::Path;

use anyhow::{Context, Result};
use versegen_corpus::{ingest, CorpusIndex};
use versegen_source::SourceLoader;

use crate::config::load_config;

/// Run the inspect command.
pub async fn run(config_path: &Path) -> Result<()> {
    let file_config = load_config(config_path)?;

    let loaded = SourceLoader::new(file_config.source_config())?.load().await?;
    let corpus = ingest(&loaded.value).context("Failed to index corpus")?;

    let summary = Summary::of(&corpus.index);

    tracing::info!("Source: {}", loaded.origin);
    tracing::info!("Shape: {}", corpus.shape);
    tracing::info!(
        "Records: {} read, {} discarded",
        corpus.records,
        corpus.index.discarded()
    );
    tracing::info!(
        "Books: {}, chapters: {}, verses: {}",
        summary.books,
        summary.chapters,
        summary.verses
    );

    for book in corpus.index.books() {
        tracing::debug!("{}: {} chapters", book, corpus.index.max_chapter(book));
    }

    Ok(())
}

/// Counts of what an index holds.
#[derive(Debug, PartialEq)]
struct Summary {
    books: usize,
    chapters: usize,
    verses: usize,
}

impl Summary {
    fn of(index: &CorpusIndex) -> Self {
        let mut summary = Summary {
            books: 0,
            chapters: 0,
            verses: index.len(),
        };

        for book in index.books() {
            summary.books += 1;
            summary.chapters += (1..=index.max_chapter(book))
                .filter(|&c| !index.verses(book, c).is_empty())
                .count();
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarizes_index() {
        let corpus = ingest(&json!({
            "Genesis": {"1": {"1": "a", "2": "b"}, "3": {"1": "c"}},
            "John": {"3": {"16": "d"}},
        }))
        .unwrap();

        assert_eq!(
            Summary::of(&corpus.index),
            Summary {
                books: 2,
                chapters: 3,
                verses: 4,
            }
        );
    }
}
