//! Address space enumeration.
//!
//! Every page lives at `<base>/<book-slug>/<chapter>/<verse>/`. Pages are only
//! produced for verses the corpus actually has, while the sitemap walks every
//! verse number up to each chapter's maximum, so a gap in the source shows up
//! as a sitemap URL without a page behind it.

use std::fmt;
use std::path::PathBuf;

use crate::books::Book;
use crate::index::CorpusIndex;

/// A resolved `(book, chapter, verse)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    pub book: Book,
    pub chapter: u32,
    pub verse: u32,
}

impl Address {
    pub fn new(book: Book, chapter: u32, verse: u32) -> Self {
        Self {
            book,
            chapter,
            verse,
        }
    }

    /// Site-relative URL, e.g. `/asv/1-Samuel/3/10/`.
    pub fn url_path(&self, base_path: &str) -> String {
        format!(
            "{}/{}/{}/{}/",
            normalize_base(base_path),
            self.book.slug(),
            self.chapter,
            self.verse
        )
    }

    /// Output file relative to the output root, e.g. `asv/1-Samuel/3/10/index.html`.
    pub fn file_path(&self, base_path: &str) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in base_path.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(self.book.slug());
        path.push(self.chapter.to_string());
        path.push(self.verse.to_string());
        path.push("index.html");
        path
    }

    /// Previous verse in the same chapter; verse 1 points at itself.
    pub fn prev(&self) -> Address {
        Self::new(self.book, self.chapter, self.verse.saturating_sub(1).max(1))
    }

    /// Next verse in the same chapter, whether or not it exists.
    pub fn next(&self) -> Address {
        Self::new(self.book, self.chapter, self.verse.saturating_add(1))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// A page to generate: an address and the verse text behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry<'a> {
    pub address: Address,
    pub text: &'a str,
}

/// Genesis 1:1, the target of the root and not-found redirects.
pub fn first_address() -> Address {
    Address::new(Book::FIRST, 1, 1)
}

/// Pages for every verse present in the index, in canon order.
///
/// Duplicate verses yield one entry each, in source order, so writing them in
/// sequence leaves the last one on disk.
pub fn pages(index: &CorpusIndex) -> Vec<PageEntry<'_>> {
    let mut out = Vec::with_capacity(index.len());

    for book in Book::all() {
        for chapter in 1..=index.max_chapter(book) {
            for verse in index.verses(book, chapter) {
                out.push(PageEntry {
                    address: Address::new(book, chapter, verse.verse),
                    text: &verse.text,
                });
            }
        }
    }

    out
}

/// Sitemap addresses: every verse number `1..=max` of every chapter
/// `1..=max` of every book present, in canon order.
pub fn sitemap_addresses(index: &CorpusIndex) -> Vec<Address> {
    let mut out = Vec::new();

    for book in Book::all() {
        for chapter in 1..=index.max_chapter(book) {
            for verse in 1..=index.max_verse(book, chapter) {
                out.push(Address::new(book, chapter, verse));
            }
        }
    }

    out
}

/// `""` or `"/asv"` style: leading slash, no trailing slash.
fn normalize_base(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
