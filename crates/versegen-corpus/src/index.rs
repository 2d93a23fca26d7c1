//! Per-book, per-chapter verse index.

use std::collections::BTreeMap;

use crate::books::Book;
use crate::record::VerseRecord;

/// A verse as stored in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedVerse {
    pub verse: u32,
    pub text: String,
}

/// Verses grouped by `(book, chapter)` and sorted by verse number, plus the
/// maxima needed to enumerate the address space.
///
/// Built once from flattened records and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    chapters: BTreeMap<(Book, u32), Vec<IndexedVerse>>,
    max_chapter: BTreeMap<Book, u32>,
    max_verse: BTreeMap<(Book, u32), u32>,
    discarded: usize,
}

impl CorpusIndex {
    /// Index `records`, dropping any whose book is not canonical or whose
    /// chapter or verse is not a positive integer.
    ///
    /// Duplicate `(book, chapter, verse)` records are all kept; the per-chapter
    /// sort is stable, so they stay in source order.
    pub fn from_records(records: impl IntoIterator<Item = VerseRecord>) -> Self {
        let mut index = Self::default();

        for record in records {
            let Some(book) = Book::from_name(&record.book) else {
                tracing::debug!(book = %record.book, "Discarding record with unknown book");
                index.discarded += 1;
                continue;
            };
            if record.chapter == 0 || record.verse == 0 {
                tracing::debug!(
                    book = %record.book,
                    chapter = record.chapter,
                    verse = record.verse,
                    "Discarding record without a usable chapter/verse"
                );
                index.discarded += 1;
                continue;
            }

            let key = (book, record.chapter);
            index.chapters.entry(key).or_default().push(IndexedVerse {
                verse: record.verse,
                text: record.text,
            });

            let max_chapter = index.max_chapter.entry(book).or_default();
            *max_chapter = (*max_chapter).max(record.chapter);

            let max_verse = index.max_verse.entry(key).or_default();
            *max_verse = (*max_verse).max(record.verse);
        }

        for verses in index.chapters.values_mut() {
            verses.sort_by_key(|v| v.verse);
        }

        index
    }

    /// Verses of one chapter in ascending verse order. Empty if the corpus
    /// has none.
    pub fn verses(&self, book: Book, chapter: u32) -> &[IndexedVerse] {
        self.chapters
            .get(&(book, chapter))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Highest chapter seen for `book`, or `0` if the book is absent.
    pub fn max_chapter(&self, book: Book) -> u32 {
        self.max_chapter.get(&book).copied().unwrap_or(0)
    }

    /// Highest verse seen in a chapter, or `0` if the chapter is absent.
    pub fn max_verse(&self, book: Book, chapter: u32) -> u32 {
        self.max_verse.get(&(book, chapter)).copied().unwrap_or(0)
    }

    /// Books with at least one verse, in canon order.
    pub fn books(&self) -> impl Iterator<Item = Book> + '_ {
        self.max_chapter.keys().copied()
    }

    /// Number of indexed verse entries, duplicates included.
    pub fn len(&self) -> usize {
        self.chapters.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Number of records dropped while indexing.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}
