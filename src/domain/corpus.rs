//! Canonical chapter corpus
//!
//! The 73 books of the Douay-Rheims canon in traditional order, with their
//! chapter counts. This table is the only input to the reading plan.

use serde::Serialize;

use super::passage::{self, ParsedPassage};

/// A book of the canon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Book {
    /// Full display name (e.g. "Song of Solomon")
    pub name: &'static str,

    /// Short form used to key commentary resources (e.g. "Sg")
    pub abbreviation: &'static str,

    /// Number of chapters, always at least 1
    pub chapters: u32,

    /// True for the seven books outside some other canons
    pub deuterocanonical: bool,
}

impl Book {
    const fn new(name: &'static str, abbreviation: &'static str, chapters: u32) -> Self {
        Self {
            name,
            abbreviation,
            chapters,
            deuterocanonical: false,
        }
    }

    const fn deutero(name: &'static str, abbreviation: &'static str, chapters: u32) -> Self {
        Self {
            name,
            abbreviation,
            chapters,
            deuterocanonical: true,
        }
    }

    /// Returns true if the book has the given chapter
    pub fn has_chapter(&self, chapter: u32) -> bool {
        (1..=self.chapters).contains(&chapter)
    }

    /// Chapter before `chapter` within this book, if any
    pub fn previous_chapter(&self, chapter: u32) -> Option<u32> {
        if chapter > 1 && self.has_chapter(chapter - 1) {
            Some(chapter - 1)
        } else {
            None
        }
    }

    /// Chapter after `chapter` within this book, if any
    pub fn next_chapter(&self, chapter: u32) -> Option<u32> {
        let next = chapter.checked_add(1)?;
        self.has_chapter(next).then_some(next)
    }
}

/// One chapter of one book: the atomic unit the reading plan allocates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChapterUnit {
    pub book: &'static Book,
    pub chapter: u32,
}

/// The 73 books in canonical order
pub static CANON: [Book; 73] = [
    Book::new("Genesis", "Gn", 50),
    Book::new("Exodus", "Ex", 40),
    Book::new("Leviticus", "Lv", 27),
    Book::new("Numbers", "Nm", 36),
    Book::new("Deuteronomy", "Dt", 34),
    Book::new("Joshua", "Jos", 24),
    Book::new("Judges", "Jgs", 21),
    Book::new("Ruth", "Ru", 4),
    Book::new("1 Samuel", "1 Sm", 31),
    Book::new("2 Samuel", "2 Sm", 24),
    Book::new("1 Kings", "1 Kgs", 22),
    Book::new("2 Kings", "2 Kgs", 25),
    Book::new("1 Chronicles", "1 Chr", 29),
    Book::new("2 Chronicles", "2 Chr", 36),
    Book::new("Ezra", "Ezr", 10),
    Book::new("Nehemiah", "Neh", 13),
    Book::deutero("Tobit", "Tb", 14),
    Book::deutero("Judith", "Jdt", 16),
    Book::new("Esther", "Est", 16),
    Book::new("Job", "Jb", 42),
    Book::new("Psalms", "Ps", 150),
    Book::new("Proverbs", "Prv", 31),
    Book::new("Ecclesiastes", "Eccl", 12),
    Book::new("Song of Solomon", "Sg", 8),
    Book::deutero("Wisdom", "Wis", 19),
    Book::deutero("Sirach", "Sir", 51),
    Book::new("Isaiah", "Is", 66),
    Book::new("Jeremiah", "Jer", 52),
    Book::new("Lamentations", "Lam", 5),
    Book::deutero("Baruch", "Bar", 6),
    Book::new("Ezekiel", "Ez", 48),
    Book::new("Daniel", "Dn", 14),
    Book::new("Hosea", "Hos", 14),
    Book::new("Joel", "Jl", 3),
    Book::new("Amos", "Am", 9),
    Book::new("Obadiah", "Ob", 1),
    Book::new("Jonah", "Jon", 4),
    Book::new("Micah", "Mi", 7),
    Book::new("Nahum", "Na", 3),
    Book::new("Habakkuk", "Hb", 3),
    Book::new("Zephaniah", "Zep", 3),
    Book::new("Haggai", "Hg", 2),
    Book::new("Zechariah", "Zec", 14),
    Book::new("Malachi", "Mal", 4),
    Book::deutero("1 Maccabees", "1 Mc", 16),
    Book::deutero("2 Maccabees", "2 Mc", 15),
    Book::new("Matthew", "Mt", 28),
    Book::new("Mark", "Mk", 16),
    Book::new("Luke", "Lk", 24),
    Book::new("John", "Jn", 21),
    Book::new("Acts", "Acts", 28),
    Book::new("Romans", "Rom", 16),
    Book::new("1 Corinthians", "1 Cor", 16),
    Book::new("2 Corinthians", "2 Cor", 13),
    Book::new("Galatians", "Gal", 6),
    Book::new("Ephesians", "Eph", 6),
    Book::new("Philippians", "Phil", 4),
    Book::new("Colossians", "Col", 4),
    Book::new("1 Thessalonians", "1 Thes", 5),
    Book::new("2 Thessalonians", "2 Thes", 3),
    Book::new("1 Timothy", "1 Tm", 6),
    Book::new("2 Timothy", "2 Tm", 4),
    Book::new("Titus", "Ti", 3),
    Book::new("Philemon", "Phlm", 1),
    Book::new("Hebrews", "Heb", 13),
    Book::new("James", "Jas", 5),
    Book::new("1 Peter", "1 Pt", 5),
    Book::new("2 Peter", "2 Pt", 3),
    Book::new("1 John", "1 Jn", 5),
    Book::new("2 John", "2 Jn", 1),
    Book::new("3 John", "3 Jn", 1),
    Book::new("Jude", "Jude", 1),
    Book::new("Apocalypse", "Rv", 22),
];

/// An ordered table of books and the chapter units it flattens into
#[derive(Debug, Clone, Copy)]
pub struct ChapterCorpus {
    books: &'static [Book],
}

impl ChapterCorpus {
    /// The canonical 73-book corpus
    pub fn canonical() -> Self {
        Self { books: &CANON }
    }

    /// A corpus over an arbitrary static table
    pub fn from_books(books: &'static [Book]) -> Self {
        Self { books }
    }

    /// Books in canonical order
    pub fn books(&self) -> &'static [Book] {
        self.books
    }

    /// Finds a book by its exact display name
    pub fn book(&self, name: &str) -> Option<&'static Book> {
        self.books.iter().find(|b| b.name == name)
    }

    /// Finds a book by its commentary abbreviation
    pub fn book_by_abbreviation(&self, abbreviation: &str) -> Option<&'static Book> {
        self.books.iter().find(|b| b.abbreviation == abbreviation)
    }

    /// Iterates every chapter of every book, in order
    pub fn units(&self) -> impl Iterator<Item = ChapterUnit> {
        self.books
            .iter()
            .flat_map(|book| (1..=book.chapters).map(move |chapter| ChapterUnit { book, chapter }))
    }

    /// Total number of chapter units
    pub fn total_chapters(&self) -> usize {
        self.books.iter().map(|b| b.chapters as usize).sum()
    }

    /// Resolves a passage string against this corpus's books
    pub fn resolve(&self, passage: &str) -> ParsedPassage<'static> {
        passage::parse(passage, self.books)
    }
}

impl Default for ChapterCorpus {
    fn default() -> Self {
        Self::canonical()
    }
}
