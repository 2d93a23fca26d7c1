//! Raw JSON to corpus index in one step.

use serde_json::Value;

use crate::index::CorpusIndex;
use crate::shape::{flatten, Shape};

/// Errors that abort corpus ingestion.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Unsupported JSON shape: expected a row list, a books list, or a book/chapter/verse map")]
    UnsupportedShape,

    #[error("Corpus parsed as {shape} but contains 0 usable verses ({records} records read)")]
    EmptyCorpus { shape: Shape, records: usize },
}

/// Outcome of ingesting a corpus.
#[derive(Debug)]
pub struct Ingested {
    /// Detected source encoding
    pub shape: Shape,

    /// Records produced by flattening, before filtering
    pub records: usize,

    /// The finished index
    pub index: CorpusIndex,
}

/// Flatten and index a parsed corpus.
///
/// Fails if the shape is not recognized or if nothing survives indexing.
pub fn ingest(input: &Value) -> Result<Ingested, CorpusError> {
    tracing::info!("Flattening...");
    let (shape, records) = flatten(input)?;
    let count = records.len();
    tracing::info!("Verses: {} ({})", count, shape);

    tracing::info!("Indexing...");
    let index = CorpusIndex::from_records(records);
    if index.is_empty() {
        return Err(CorpusError::EmptyCorpus {
            shape,
            records: count,
        });
    }
    if index.discarded() > 0 {
        tracing::warn!("Discarded {} records with unknown books or bad numbering", index.discarded());
    }

    Ok(Ingested {
        shape,
        records: count,
        index,
    })
}
