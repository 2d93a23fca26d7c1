//! Shape detection and flattening of raw corpus JSON.
//!
//! Three encodings are recognized, tried in order:
//!
//! 1. [`Shape::RowList`]: `[{"book": .., "chapter": .., "verse": .., "text": ..}, ..]`
//!    with field names detected from the first row.
//! 2. [`Shape::NestedBooks`]: `{"books": [{"name": .., "chapters": [{"verses": [..]}]}]}`.
//! 3. [`Shape::BookMap`]: `{"Genesis": {"1": {"1": "In the beginning.."}}}`.

use std::fmt;

use serde_json::Value;

use crate::books::{normalize_book, BookToken, BOOKS};
use crate::coerce::{first_truthy, is_truthy, parse_number, to_number, to_ordinal, to_text};
use crate::ingest::CorpusError;
use crate::record::VerseRecord;

const BOOK_FIELDS: &[&str] = &["book", "book_name", "name", "title", "b", "book_id", "bookid"];
const CHAPTER_FIELDS: &[&str] = &["chapter", "chapter_num", "c", "chap", "chap_num", "number"];
const VERSE_FIELDS: &[&str] = &["verse", "verse_num", "v", "num", "id"];
const TEXT_FIELDS: &[&str] = &["text", "content", "verse_text", "t", "body"];

/// A recognized raw corpus encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A flat list of row objects.
    RowList,
    /// An object with a `books` list of nested chapters and verses.
    NestedBooks,
    /// An object keyed book → chapter → verse → text.
    BookMap,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowList => f.write_str("row list"),
            Self::NestedBooks => f.write_str("nested books"),
            Self::BookMap => f.write_str("book map"),
        }
    }
}

/// Field names chosen for each role of a row-list corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowFields {
    book: &'static str,
    chapter: &'static str,
    verse: &'static str,
    text: &'static str,
}

/// Detect the shape of `input` and flatten it into verse records.
///
/// Fails with [`CorpusError::UnsupportedShape`] when no encoding matches.
/// Records are returned in source order; nothing is filtered here.
pub fn flatten(input: &Value) -> Result<(Shape, Vec<VerseRecord>), CorpusError> {
    if let Value::Array(rows) = input {
        if let Some(records) = flatten_rows(rows) {
            return Ok((Shape::RowList, records));
        }
    }

    if let Some(records) = flatten_books(input) {
        return Ok((Shape::NestedBooks, records));
    }

    if let Some(records) = flatten_book_map(input) {
        return Ok((Shape::BookMap, records));
    }

    Err(CorpusError::UnsupportedShape)
}

/// Pick the first present alias for every role, looking only at `sample`.
fn detect_fields(sample: &Value) -> Option<RowFields> {
    let object = sample.as_object()?;
    let pick = |aliases: &[&'static str]| aliases.iter().copied().find(|k| object.contains_key(*k));

    Some(RowFields {
        book: pick(BOOK_FIELDS)?,
        chapter: pick(CHAPTER_FIELDS)?,
        verse: pick(VERSE_FIELDS)?,
        text: pick(TEXT_FIELDS)?,
    })
}

fn flatten_rows(rows: &[Value]) -> Option<Vec<VerseRecord>> {
    let fields = detect_fields(rows.first()?)?;
    tracing::debug!(?fields, "Detected row fields");

    // Every row is read with the first row's field names.
    let records = rows
        .iter()
        .map(|row| {
            VerseRecord::new(
                &BookToken::from_value(row.get(fields.book)),
                to_ordinal(to_number(row.get(fields.chapter))),
                to_ordinal(to_number(row.get(fields.verse))),
                &to_text(row.get(fields.text)),
            )
        })
        .collect();

    Some(records)
}

fn flatten_books(input: &Value) -> Option<Vec<VerseRecord>> {
    let books = input.get("books")?.as_array()?;
    let mut out = Vec::new();

    for (bi, book) in books.iter().enumerate() {
        let token = match first_truthy(book, &["name", "title"]) {
            Some(value) => BookToken::from_value(Some(value)),
            None => BookToken::Text(BOOKS.get(bi).copied().unwrap_or_default().to_string()),
        };
        let name = normalize_book(&token);

        for (ci, chapter) in list_field(book, &["chapters", "Chapters"]).iter().enumerate() {
            let chapter_num = match first_truthy(chapter, &["chapter", "number"]) {
                Some(value) => to_ordinal(to_number(Some(value))),
                None => ordinal_from_position(ci),
            };

            for (vi, verse) in list_field(chapter, &["verses", "Verses"]).iter().enumerate() {
                let (verse_num, text) = match verse {
                    Value::String(text) => (ordinal_from_position(vi), text.trim().to_string()),
                    other if is_truthy(Some(other)) => {
                        let verse_num = match first_truthy(other, &["verse", "number"]) {
                            Some(value) => to_ordinal(to_number(Some(value))),
                            None => ordinal_from_position(vi),
                        };
                        let text = first_truthy(other, &["text", "content", "verse_text"])
                            .map(|value| to_text(Some(value)))
                            .unwrap_or_default();
                        (verse_num, text.trim().to_string())
                    }
                    _ => continue,
                };

                out.push(VerseRecord {
                    book: name.clone(),
                    chapter: chapter_num,
                    verse: verse_num,
                    text,
                });
            }
        }
    }

    Some(out)
}

fn flatten_book_map(books: &Value) -> Option<Vec<VerseRecord>> {
    let mut out = Vec::new();

    for (book_key, chapters) in entries(books)? {
        let Some(chapters) = entries(chapters) else {
            continue;
        };
        let name = normalize_book(&BookToken::Text(book_key));

        for (chapter_key, verses) in chapters {
            let Some(verses) = entries(verses) else {
                continue;
            };
            let chapter = to_ordinal(parse_number(&chapter_key));

            for (verse_key, text) in verses {
                out.push(VerseRecord {
                    book: name.clone(),
                    chapter,
                    verse: to_ordinal(parse_number(&verse_key)),
                    text: to_text(Some(text)).trim().to_string(),
                });
            }
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Keyed children of a map level. Arrays count, keyed by position.
fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect()),
        _ => None,
    }
}

/// The first truthy list among `keys`, or an empty slice.
fn list_field<'a>(object: &'a Value, keys: &[&str]) -> &'a [Value] {
    first_truthy(object, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn ordinal_from_position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(0)
}
