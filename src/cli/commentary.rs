//! Commentary CLI commands
//!
//! The store is loaded once per invocation and only queried afterwards.

use anyhow::Result;
use clap::Subcommand;

use super::app::Settings;
use super::output::Output;
use crate::domain::{ChapterCorpus, CommentarySource, CommentaryStore};
use crate::storage::CommentaryLoader;

#[derive(Subcommand)]
pub enum CommentaryCommands {
    /// Show commentary for a verse
    ///
    /// Examples:
    ///   douay commentary show Gn 1 1
    ///   douay commentary show Genesis 1 1 --by-source
    ///   douay commentary show Gn 1 1 --source lapide
    Show {
        /// Book abbreviation or full name
        book: String,

        /// Chapter number
        chapter: u32,

        /// Verse number
        verse: u32,

        /// Group the notes under each source
        #[arg(long)]
        by_source: bool,

        /// Only show notes from this source (haydock, lapide, douai-1609)
        #[arg(long)]
        source: Option<CommentarySource>,
    },

    /// List the sources that have commentary for a verse
    Sources {
        /// Book abbreviation or full name
        book: String,

        /// Chapter number
        chapter: u32,

        /// Verse number
        verse: u32,
    },

    /// Show what was loaded from each source
    Stats,
}

pub fn run(cmd: CommentaryCommands, output: &Output, settings: &Settings) -> Result<()> {
    let loader = CommentaryLoader::new(&settings.commentary_dir);
    output.verbose_ctx(
        "commentary",
        &format!("Loading commentary from {}", loader.dir().display()),
    );
    let store = loader.load();

    match cmd {
        CommentaryCommands::Show {
            book,
            chapter,
            verse,
            by_source,
            source,
        } => {
            let abbreviation = abbreviation_for(&book);
            if by_source {
                show_grouped(output, &store, abbreviation, chapter, verse, source)
            } else {
                show(output, &store, abbreviation, chapter, verse, source)
            }
        }
        CommentaryCommands::Sources {
            book,
            chapter,
            verse,
        } => sources(output, &store, abbreviation_for(&book), chapter, verse),
        CommentaryCommands::Stats => stats(output, &store),
    }
}

/// Maps a full book name to its abbreviation; anything else passes through
fn abbreviation_for(book: &str) -> &str {
    ChapterCorpus::canonical()
        .book(book)
        .map(|b| b.abbreviation)
        .unwrap_or(book)
}

fn show(
    output: &Output,
    store: &CommentaryStore,
    abbreviation: &str,
    chapter: u32,
    verse: u32,
    source: Option<CommentarySource>,
) -> Result<()> {
    let entries: Vec<_> = store
        .commentaries(abbreviation, chapter, verse)
        .iter()
        .filter(|e| source.is_none_or(|s| e.source == s))
        .collect();
    output.verbose_ctx("commentary", &format!("Found {} entries", entries.len()));

    if output.is_json() {
        output.data(&entries);
    } else if entries.is_empty() {
        println!("No commentary for {} {}:{}", abbreviation, chapter, verse);
    } else {
        for entry in entries {
            println!("[{}] {}", entry.source.short_name(), entry.text);
        }
    }

    Ok(())
}

fn show_grouped(
    output: &Output,
    store: &CommentaryStore,
    abbreviation: &str,
    chapter: u32,
    verse: u32,
    source: Option<CommentarySource>,
) -> Result<()> {
    let mut groups = store.commentaries_by_source(abbreviation, chapter, verse);
    if let Some(source) = source {
        groups.retain(|g| g.source == source);
    }

    if output.is_json() {
        output.data(&groups);
    } else if groups.is_empty() {
        println!("No commentary for {} {}:{}", abbreviation, chapter, verse);
    } else {
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", group.source.display_name());
            println!("{}", "-".repeat(40));
            for entry in &group.entries {
                println!("{}", entry.text);
            }
        }
    }

    Ok(())
}

fn sources(
    output: &Output,
    store: &CommentaryStore,
    abbreviation: &str,
    chapter: u32,
    verse: u32,
) -> Result<()> {
    let sources = store.available_sources(abbreviation, chapter, verse);

    if output.is_json() {
        output.data(&sources);
    } else if sources.is_empty() {
        println!("No commentary for {} {}:{}", abbreviation, chapter, verse);
    } else {
        for source in sources {
            println!("{}", source.display_name());
        }
    }

    Ok(())
}

fn stats(output: &Output, store: &CommentaryStore) -> Result<()> {
    let report = store.report();

    if output.is_json() {
        output.data(&serde_json::json!({
            "verses": store.verse_count(),
            "entries": report.total_entries(),
            "skipped": report.total_skipped(),
            "sources": report.sources,
        }));
        return Ok(());
    }

    println!("{:<22} {:<8} {:>8} {:>8}", "SOURCE", "FILE", "ENTRIES", "SKIPPED");
    println!("{}", "-".repeat(50));
    for source in &report.sources {
        let found = if source.found { "found" } else { "missing" };
        println!(
            "{:<22} {:<8} {:>8} {:>8}",
            source.source.display_name(),
            found,
            source.entries,
            source.skipped
        );
    }
    println!();
    println!(
        "{} entries across {} verses",
        report.total_entries(),
        store.verse_count()
    );

    Ok(())
}
