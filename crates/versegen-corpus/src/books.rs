//! Canonical book list and book-name normalization.
//!
//! Sources spell books every which way: abbreviations, OSIS codes, roman
//! numeral prefixes, bare 1-based indices. Everything funnels through
//! [`normalize_book`], which never fails. A token it cannot place is handed
//! back verbatim and the indexer drops it later.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::coerce::{number_to_string, to_text};

/// The 66 books in traditional Protestant canon order.
pub const BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Known alternate spellings, keyed by canonical name.
///
/// Keys are compared after [`normalize_key`], so case, periods and spacing
/// do not matter here.
const ALIASES: &[(&str, &[&str])] = &[
    ("Genesis", &["gen", "ge", "gn"]),
    ("Exodus", &["exod", "exo", "ex"]),
    ("Leviticus", &["lev", "le", "lv"]),
    ("Numbers", &["num", "nu", "nm", "nb"]),
    ("Deuteronomy", &["deut", "deu", "de", "dt"]),
    ("Joshua", &["josh", "jos", "jsh"]),
    ("Judges", &["judg", "jdg", "jg", "jdgs"]),
    ("Ruth", &["rth", "ru"]),
    (
        "1 Samuel",
        &["1 sam", "1sam", "1 sa", "1sa", "1 sm", "i samuel", "i sam", "1st samuel", "first samuel"],
    ),
    (
        "2 Samuel",
        &["2 sam", "2sam", "2 sa", "2sa", "2 sm", "ii samuel", "ii sam", "2nd samuel", "second samuel"],
    ),
    (
        "1 Kings",
        &["1 kgs", "1kgs", "1 ki", "1ki", "1 kin", "i kings", "i kgs", "1st kings", "first kings"],
    ),
    (
        "2 Kings",
        &["2 kgs", "2kgs", "2 ki", "2ki", "2 kin", "ii kings", "ii kgs", "2nd kings", "second kings"],
    ),
    (
        "1 Chronicles",
        &["1 chr", "1chr", "1 chron", "1chron", "1 ch", "i chronicles", "1st chronicles", "first chronicles"],
    ),
    (
        "2 Chronicles",
        &["2 chr", "2chr", "2 chron", "2chron", "2 ch", "ii chronicles", "2nd chronicles", "second chronicles"],
    ),
    ("Ezra", &["ezr"]),
    ("Nehemiah", &["neh", "ne"]),
    ("Esther", &["esth", "est", "es"]),
    ("Job", &["jb"]),
    ("Psalms", &["ps", "psa", "psalm", "pss", "psm", "pslm"]),
    ("Proverbs", &["prov", "pro", "prv", "pr"]),
    ("Ecclesiastes", &["eccl", "eccles", "ecc", "ec", "qoh", "qoheleth"]),
    (
        "Song of Solomon",
        &["song", "song of songs", "song of sol", "sos", "ss", "sng", "canticles", "cant"],
    ),
    ("Isaiah", &["isa", "is"]),
    ("Jeremiah", &["jer", "je", "jr"]),
    ("Lamentations", &["lam", "la"]),
    ("Ezekiel", &["ezek", "eze", "ezk"]),
    ("Daniel", &["dan", "da", "dn"]),
    ("Hosea", &["hos", "ho"]),
    ("Joel", &["jl"]),
    ("Amos", &["am"]),
    ("Obadiah", &["obad", "oba", "ob"]),
    ("Jonah", &["jnh", "jon"]),
    ("Micah", &["mic", "mc"]),
    ("Nahum", &["nah", "na"]),
    ("Habakkuk", &["hab", "hb"]),
    ("Zephaniah", &["zeph", "zep", "zp"]),
    ("Haggai", &["hag", "hg"]),
    ("Zechariah", &["zech", "zec", "zc"]),
    ("Malachi", &["mal", "ml"]),
    ("Matthew", &["matt", "mat", "mt"]),
    ("Mark", &["mrk", "mk", "mr"]),
    ("Luke", &["luk", "lk"]),
    ("John", &["jn", "jhn", "joh"]),
    ("Acts", &["act", "ac", "acts of the apostles"]),
    ("Romans", &["rom", "ro", "rm"]),
    (
        "1 Corinthians",
        &["1 cor", "1cor", "1 co", "1co", "i corinthians", "i cor", "1st corinthians", "first corinthians"],
    ),
    (
        "2 Corinthians",
        &["2 cor", "2cor", "2 co", "2co", "ii corinthians", "ii cor", "2nd corinthians", "second corinthians"],
    ),
    ("Galatians", &["gal", "ga"]),
    ("Ephesians", &["eph", "ephes"]),
    ("Philippians", &["phil", "php", "pp"]),
    ("Colossians", &["col"]),
    (
        "1 Thessalonians",
        &["1 thess", "1thess", "1 thes", "1 th", "1th", "i thessalonians", "1st thessalonians", "first thessalonians"],
    ),
    (
        "2 Thessalonians",
        &["2 thess", "2thess", "2 thes", "2 th", "2th", "ii thessalonians", "2nd thessalonians", "second thessalonians"],
    ),
    (
        "1 Timothy",
        &["1 tim", "1tim", "1 ti", "1ti", "i timothy", "1st timothy", "first timothy"],
    ),
    (
        "2 Timothy",
        &["2 tim", "2tim", "2 ti", "2ti", "ii timothy", "2nd timothy", "second timothy"],
    ),
    ("Titus", &["tit"]),
    ("Philemon", &["philem", "phlm", "phm", "pm"]),
    ("Hebrews", &["heb"]),
    ("James", &["jas", "jm"]),
    (
        "1 Peter",
        &["1 pet", "1pet", "1 pe", "1pe", "1 pt", "1pt", "i peter", "1st peter", "first peter"],
    ),
    (
        "2 Peter",
        &["2 pet", "2pet", "2 pe", "2pe", "2 pt", "2pt", "ii peter", "2nd peter", "second peter"],
    ),
    (
        "1 John",
        &["1 jn", "1jn", "1 jhn", "1jhn", "1john", "i john", "1st john", "first john"],
    ),
    (
        "2 John",
        &["2 jn", "2jn", "2 jhn", "2jhn", "2john", "ii john", "2nd john", "second john"],
    ),
    (
        "3 John",
        &["3 jn", "3jn", "3 jhn", "3jhn", "3john", "iii john", "3rd john", "third john"],
    ),
    ("Jude", &["jud", "jd"]),
    (
        "Revelation",
        &["rev", "re", "rv", "revelations", "the revelation", "revelation of john", "apocalypse"],
    ),
];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static ALIAS_LOOKUP: LazyLock<HashMap<String, Book>> = LazyLock::new(|| {
    let mut lookup = HashMap::new();
    for (name, aliases) in ALIASES {
        if let Some(book) = Book::from_name(name) {
            for alias in *aliases {
                lookup.insert(normalize_key(alias), book);
            }
        }
    }
    lookup
});

static CANONICAL_KEYS: LazyLock<Vec<String>> =
    LazyLock::new(|| BOOKS.iter().map(|name| normalize_key(name)).collect());

/// One of the 66 canonical books.
///
/// Ordering follows canon order, so sorting books sorts Genesis first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Book(u8);

impl Book {
    /// Number of canonical books.
    pub const COUNT: usize = BOOKS.len();

    /// Genesis.
    pub const FIRST: Book = Book(0);

    /// Iterate all books in canon order.
    pub fn all() -> impl Iterator<Item = Book> {
        (0..Self::COUNT as u8).map(Book)
    }

    /// Look up a book by its 1-based canon position.
    pub fn from_number(number: usize) -> Option<Book> {
        if (1..=Self::COUNT).contains(&number) {
            Some(Book((number - 1) as u8))
        } else {
            None
        }
    }

    /// Look up a book by its exact canonical name.
    pub fn from_name(name: &str) -> Option<Book> {
        BOOKS.iter().position(|b| *b == name).map(|i| Book(i as u8))
    }

    /// Canonical name, e.g. `"1 Samuel"`.
    pub fn name(self) -> &'static str {
        BOOKS[self.0 as usize]
    }

    /// 1-based canon position.
    pub fn number(self) -> usize {
        self.0 as usize + 1
    }

    /// Path segment for this book: whitespace runs become `-`.
    pub fn slug(self) -> String {
        WHITESPACE.replace_all(self.name(), "-").into_owned()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw book identifier as found in source data.
#[derive(Debug, Clone, PartialEq)]
pub enum BookToken {
    /// A JSON number, expected to be a 1-based canon index.
    Number(f64),
    /// Anything else, already stringified.
    Text(String),
}

impl BookToken {
    /// Build a token from an optional JSON value.
    ///
    /// Numbers stay numeric; everything else (including a missing field) is
    /// stringified the same way verse text is.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            other => Self::Text(to_text(other)),
        }
    }
}

impl From<&str> for BookToken {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for BookToken {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Map a raw book token onto a canonical book name.
///
/// Numeric tokens are clamped into `1..=66`. Text is matched against the alias table, then the canonical names, then as a
/// prefix of a canonical name. Anything left over is returned unchanged.
pub fn normalize_book(token: &BookToken) -> String {
    match token {
        BookToken::Number(n) => normalize_index(*n),
        BookToken::Text(text) => match lookup_name(text) {
            Some(book) => book.name().to_string(),
            None => text.clone(),
        },
    }
}

fn normalize_index(n: f64) -> String {
    if n.is_nan() || (n.is_finite() && n.fract() != 0.0) {
        return number_to_string(n);
    }
    let clamped = n.clamp(1.0, Book::COUNT as f64) as usize;
    BOOKS[clamped - 1].to_string()
}

fn lookup_name(text: &str) -> Option<Book> {
    let key = normalize_key(text);
    if let Some(book) = ALIAS_LOOKUP.get(&key) {
        return Some(*book);
    }

    if let Some(i) = CANONICAL_KEYS.iter().position(|c| *c == key) {
        return Some(Book(i as u8));
    }

    if key.is_empty() {
        return None;
    }
    CANONICAL_KEYS
        .iter()
        .position(|c| c.starts_with(&key))
        .map(|i| Book(i as u8))
}

/// Lowercase, drop periods, collapse whitespace, trim.
fn normalize_key(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace('.', "");
    WHITESPACE.replace_all(lowered.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        normalize_book(&BookToken::from(s))
    }

    #[test]
    fn canonical_names_round_trip() {
        for name in BOOKS {
            assert_eq!(norm(name), name);
            assert_eq!(norm(&name.to_lowercase()), name);
            assert_eq!(norm(&name.to_uppercase()), name);
        }
    }

    #[test]
    fn every_alias_maps_to_its_book() {
        for (name, aliases) in ALIASES {
            assert!(Book::from_name(name).is_some(), "{name} is not canonical");
            for alias in *aliases {
                assert_eq!(norm(alias), *name, "alias {alias:?}");
            }
        }
    }

    #[test]
    fn strips_periods_and_spacing() {
        assert_eq!(norm("Gen."), "Genesis");
        assert_eq!(norm("  1   Sam. "), "1 Samuel");
        assert_eq!(norm("SS"), "Song of Solomon");
        assert_eq!(norm("Song of Songs"), "Song of Solomon");
    }

    #[test]
    fn falls_back_to_prefix_match() {
        assert_eq!(norm("Genes"), "Genesis");
        assert_eq!(norm("Deuter"), "Deuteronomy");
        assert_eq!(norm("philip"), "Philippians");
    }

    #[test]
    fn unknown_tokens_are_returned_verbatim() {
        assert_eq!(norm("Tobit"), "Tobit");
        assert_eq!(norm(""), "");
        assert_eq!(norm("   "), "   ");
    }

    #[test]
    fn numeric_tokens_clamp_into_range() {
        assert_eq!(normalize_book(&BookToken::from(1)), "Genesis");
        assert_eq!(normalize_book(&BookToken::from(40)), "Matthew");
        assert_eq!(normalize_book(&BookToken::from(66)), "Revelation");
        assert_eq!(normalize_book(&BookToken::from(67)), "Revelation");
        assert_eq!(normalize_book(&BookToken::from(0)), "Genesis");
        assert_eq!(normalize_book(&BookToken::from(-4)), "Genesis");
    }

    #[test]
    fn digit_strings_are_names_not_indices() {
        assert_eq!(norm("1"), "1 Samuel");
        assert_eq!(norm("2"), "2 Samuel");
        assert_eq!(norm("19"), "19");
        assert_eq!(normalize_book(&BookToken::from(19)), "Psalms");
    }

    #[test]
    fn fractional_numbers_are_not_books() {
        assert_eq!(normalize_book(&BookToken::Number(2.5)), "2.5");
        assert!(Book::from_name(&normalize_book(&BookToken::Number(f64::NAN))).is_none());
    }

    #[test]
    fn tokens_from_json_values() {
        let row = serde_json::json!({"b": 2, "name": "Lev", "flag": true});
        assert_eq!(normalize_book(&BookToken::from_value(row.get("b"))), "Exodus");
        assert_eq!(normalize_book(&BookToken::from_value(row.get("name"))), "Leviticus");
        assert_eq!(normalize_book(&BookToken::from_value(row.get("missing"))), "undefined");
        assert_eq!(normalize_book(&BookToken::from_value(row.get("flag"))), "true");
    }

    #[test]
    fn book_metadata() {
        let sam = Book::from_name("1 Samuel").unwrap();
        assert_eq!(sam.number(), 9);
        assert_eq!(sam.slug(), "1-Samuel");
        assert_eq!(Book::from_number(66).unwrap().name(), "Revelation");
        assert!(Book::from_number(0).is_none());
        assert!(Book::from_number(67).is_none());
        assert_eq!(Book::all().count(), 66);
        assert_eq!(Book::from_name("Song of Solomon").unwrap().slug(), "Song-of-Solomon");
    }
}
