//! Canon and passage commands (books, resolve)

use anyhow::Result;

use super::output::Output;
use crate::domain::ChapterCorpus;

/// List the books of the canon
pub fn books(output: &Output, deuterocanonical_only: bool) -> Result<()> {
    let corpus = ChapterCorpus::canonical();
    let books: Vec<_> = corpus
        .books()
        .iter()
        .filter(|b| !deuterocanonical_only || b.deuterocanonical)
        .collect();

    output.verbose_ctx("books", &format!("{} of {} books", books.len(), corpus.books().len()));

    if output.is_json() {
        output.data(&books);
        return Ok(());
    }

    println!("{:<18} {:<8} {:>8}", "BOOK", "ABBR", "CHAPTERS");
    println!("{}", "-".repeat(36));
    for book in &books {
        let marker = if book.deuterocanonical { " *" } else { "" };
        println!(
            "{:<18} {:<8} {:>8}{}",
            book.name, book.abbreviation, book.chapters, marker
        );
    }

    if !deuterocanonical_only {
        println!();
        println!(
            "{} books, {} chapters (* deuterocanonical)",
            books.len(),
            corpus.total_chapters()
        );
    }

    Ok(())
}

/// Resolve a passage string to a book and starting chapter
pub fn resolve(output: &Output, passage: &str) -> Result<()> {
    let parsed = ChapterCorpus::canonical().resolve(passage);

    if output.is_json() {
        output.data(&serde_json::json!({
            "passage": passage,
            "resolved": parsed.is_resolved(),
            "book": parsed.book.map(|b| b.name),
            "abbreviation": parsed.book.map(|b| b.abbreviation),
            "chapter": parsed.start_chapter,
            "previous": parsed.book.and_then(|b| b.previous_chapter(parsed.start_chapter)),
            "next": parsed.book.and_then(|b| b.next_chapter(parsed.start_chapter)),
        }));
        return Ok(());
    }

    match parsed.book {
        Some(book) => {
            println!("{} {}", book.name, parsed.start_chapter);
            if !book.has_chapter(parsed.start_chapter) {
                println!("(note: {} has {} chapters)", book.name, book.chapters);
            }
            if let Some(previous) = book.previous_chapter(parsed.start_chapter) {
                println!("Previous: {} {}", book.name, previous);
            }
            if let Some(next) = book.next_chapter(parsed.start_chapter) {
                println!("Next:     {} {}", book.name, next);
            }
        }
        None => println!("Unresolved: {}", passage),
    }

    Ok(())
}
