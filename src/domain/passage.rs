//! Passage string resolution
//!
//! Turns a descriptor such as `"Genesis 1-3"` or `"Song of Solomon 4"` back
//! into a navigable (book, starting chapter) location.

use serde::Serialize;

use super::corpus::Book;

/// Result of resolving a passage string
///
/// `book` is `None` when the name does not match any known book; callers
/// usually fall back to showing the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedPassage<'a> {
    pub book: Option<&'a Book>,
    pub start_chapter: u32,
}

impl ParsedPassage<'_> {
    /// Returns true if the book name was recognised
    pub fn is_resolved(&self) -> bool {
        self.book.is_some()
    }
}

/// Resolves `passage` against `books`
///
/// Never fails. The last space-separated token is the chapter part, the
/// rest is the book name. Only the first chapter of a range is kept, and an
/// unparsable chapter defaults to 1.
pub fn parse<'a>(passage: &str, books: &'a [Book]) -> ParsedPassage<'a> {
    let mut tokens: Vec<&str> = passage.split(' ').collect();
    if tokens.len() < 2 {
        return ParsedPassage {
            book: None,
            start_chapter: 1,
        };
    }

    let chapter_part = tokens.pop().unwrap_or_default();
    let book_name = tokens.join(" ");

    let start_chapter = chapter_part
        .split('-')
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(1);

    ParsedPassage {
        book: books.iter().find(|b| b.name == book_name),
        start_chapter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::corpus::CANON;
    use proptest::prelude::*;

    fn name(parsed: &ParsedPassage) -> Option<&'static str> {
        parsed.book.map(|b| b.name)
    }

    #[test]
    fn range_resolves_to_first_chapter() {
        let parsed = parse("Genesis 1-3", &CANON);
        assert_eq!(name(&parsed), Some("Genesis"));
        assert_eq!(parsed.start_chapter, 1);
    }

    #[test]
    fn multi_word_book_name() {
        let parsed = parse("Song of Solomon 4", &CANON);
        assert_eq!(name(&parsed), Some("Song of Solomon"));
        assert_eq!(parsed.start_chapter, 4);
    }

    #[test]
    fn numbered_book_name() {
        let parsed = parse("1 Maccabees 10-12", &CANON);
        assert_eq!(name(&parsed), Some("1 Maccabees"));
        assert_eq!(parsed.start_chapter, 10);
    }

    #[test]
    fn unknown_book_is_unresolved() {
        let parsed = parse("Unknown 9", &CANON);
        assert!(!parsed.is_resolved());
        assert_eq!(parsed.start_chapter, 9);
    }

    #[test]
    fn single_token_defaults() {
        for input in ["Genesis", "", "7"] {
            let parsed = parse(input, &CANON);
            assert_eq!(parsed.book, None, "input {:?}", input);
            assert_eq!(parsed.start_chapter, 1);
        }
    }

    #[test]
    fn bad_chapter_defaults_to_one() {
        let parsed = parse("Exodus x-4", &CANON);
        assert_eq!(name(&parsed), Some("Exodus"));
        assert_eq!(parsed.start_chapter, 1);
    }

    #[test]
    fn book_match_is_exact() {
        assert!(!parse("genesis 1", &CANON).is_resolved());
        assert!(!parse("Song  of Solomon 1", &CANON).is_resolved());
    }

    proptest! {
        #[test]
        fn never_panics(input in ".*") {
            let _ = parse(&input, &CANON);
        }

        #[test]
        fn known_book_and_chapter_round_trip(idx in 0usize..73, start in 1u32..200, span in 0u32..5) {
            let book = &CANON[idx];
            let text = if span == 0 {
                format!("{} {}", book.name, start)
            } else {
                format!("{} {}-{}", book.name, start, start + span)
            };
            let parsed = parse(&text, &CANON);
            prop_assert_eq!(parsed.book.map(|b| b.name), Some(book.name));
            prop_assert_eq!(parsed.start_chapter, start);
        }
    }
}
