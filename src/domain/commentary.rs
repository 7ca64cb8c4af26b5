//! Verse commentary index
//!
//! Commentary comes from three fixed sources. Entries are keyed by
//! (book abbreviation, chapter, verse) and kept in ingestion order; grouping
//! by source always follows [`CommentarySource::PRIORITY`], never the order
//! in which the sources were read.
//!
//! A store is only obtainable from [`CommentaryStoreBuilder::build`], so a
//! half-loaded index can never be queried.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A commentary source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentarySource {
    Haydock,
    Lapide,
    #[serde(rename = "douai-1609")]
    Douai1609,
}

impl CommentarySource {
    /// Display and grouping order
    pub const PRIORITY: [CommentarySource; 3] = [
        CommentarySource::Haydock,
        CommentarySource::Lapide,
        CommentarySource::Douai1609,
    ];

    /// Full name shown to readers
    pub fn display_name(&self) -> &'static str {
        match self {
            CommentarySource::Haydock => "Haydock",
            CommentarySource::Lapide => "Cornelius à Lapide",
            CommentarySource::Douai1609 => "Douai 1609",
        }
    }

    /// Compact label for tight layouts
    pub fn short_name(&self) -> &'static str {
        match self {
            CommentarySource::Haydock => "Haydock",
            CommentarySource::Lapide => "Lapide",
            CommentarySource::Douai1609 => "Douai 1609",
        }
    }

    /// Stable identifier, also the resource file stem
    pub fn id(&self) -> &'static str {
        match self {
            CommentarySource::Haydock => "haydock",
            CommentarySource::Lapide => "lapide",
            CommentarySource::Douai1609 => "douai-1609",
        }
    }

    /// File name of the tab-separated resource for this source
    pub fn resource_name(&self) -> String {
        format!("{}.tsv", self.id())
    }
}

impl fmt::Display for CommentarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CommentarySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|source| source.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown commentary source: {}", s))
    }
}

/// One note on one verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentaryEntry {
    pub source: CommentarySource,
    pub abbreviation: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Composite lookup key, compared field by field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseKey {
    pub abbreviation: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseKey {
    pub fn new(abbreviation: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            chapter,
            verse,
        }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.abbreviation, self.chapter, self.verse)
    }
}

/// Why a resource row was not ingested
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("expected 3 tab-separated fields, found {0}")]
    TooFewFields(usize),

    #[error("malformed chapter:verse reference: {0:?}")]
    BadReference(String),
}

/// Parses one resource line.
///
/// Returns `Ok(None)` for the header row, which is only recognised on the
/// first line of a file. Chapter and verse must both parse as unsigned
/// integers, so a negative reference such as `-1:2` is malformed.
pub fn parse_row(
    source: CommentarySource,
    line_index: usize,
    line: &str,
) -> Result<Option<CommentaryEntry>, RowError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(RowError::TooFewFields(fields.len()));
    }

    let abbreviation = fields[0];
    if line_index == 0 && abbreviation.eq_ignore_ascii_case("book") {
        return Ok(None);
    }

    let reference = fields[1];
    let (chapter, verse) = match reference.split(':').collect::<Vec<_>>().as_slice() {
        [chapter, verse] => match (chapter.parse::<u32>(), verse.parse::<u32>()) {
            (Ok(c), Ok(v)) => (c, v),
            _ => return Err(RowError::BadReference(reference.to_string())),
        },
        _ => return Err(RowError::BadReference(reference.to_string())),
    };

    Ok(Some(CommentaryEntry {
        source,
        abbreviation: abbreviation.to_string(),
        chapter,
        verse,
        text: fields[2].to_string(),
    }))
}

/// Splits a resource into records on `\n`, `\r\n` or a lone `\r`
fn records(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Ingestion outcome for one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: CommentarySource,
    /// False when the resource was missing or unreadable
    pub found: bool,
    pub entries: usize,
    pub skipped: usize,
}

impl SourceReport {
    fn new(source: CommentarySource) -> Self {
        Self {
            source,
            found: false,
            entries: 0,
            skipped: 0,
        }
    }
}

/// Ingestion outcome for every source, in priority order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadReport {
    pub sources: Vec<SourceReport>,
}

impl LoadReport {
    pub fn source(&self, source: CommentarySource) -> Option<&SourceReport> {
        self.sources.iter().find(|r| r.source == source)
    }

    pub fn total_entries(&self) -> usize {
        self.sources.iter().map(|r| r.entries).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.sources.iter().map(|r| r.skipped).sum()
    }
}

/// Entries from a single source for one verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceGroup<'a> {
    pub source: CommentarySource,
    pub entries: Vec<&'a CommentaryEntry>,
}

/// Accumulates entries while sources are being read
#[derive(Debug)]
pub struct CommentaryStoreBuilder {
    entries: HashMap<VerseKey, Vec<CommentaryEntry>>,
    reports: HashMap<CommentarySource, SourceReport>,
}

impl CommentaryStoreBuilder {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            reports: HashMap::new(),
        }
    }

    fn report_mut(&mut self, source: CommentarySource) -> &mut SourceReport {
        self.reports
            .entry(source)
            .or_insert_with(|| SourceReport::new(source))
    }

    /// Ingests the full text of a source's resource
    ///
    /// Malformed rows are skipped and counted; they never abort the source.
    /// Empty records are ignored.
    pub fn ingest_str(&mut self, source: CommentarySource, content: &str) -> &mut Self {
        let mut added = 0;
        let mut skipped = 0;

        for (index, line) in records(content).enumerate() {
            if line.is_empty() {
                continue;
            }
            match parse_row(source, index, line) {
                Ok(Some(entry)) => {
                    let key = VerseKey::new(entry.abbreviation.clone(), entry.chapter, entry.verse);
                    self.entries.entry(key).or_default().push(entry);
                    added += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(source = source.id(), line = index + 1, "Skipping row: {}", e);
                    skipped += 1;
                }
            }
        }

        let report = self.report_mut(source);
        report.found = true;
        report.entries += added;
        report.skipped += skipped;
        self
    }

    /// Records that a source's resource could not be read
    pub fn mark_missing(&mut self, source: CommentarySource) -> &mut Self {
        self.report_mut(source);
        self
    }

    /// Finishes loading; the result is read-only
    pub fn build(mut self) -> CommentaryStore {
        let sources = CommentarySource::PRIORITY
            .into_iter()
            .map(|source| {
                self.reports
                    .remove(&source)
                    .unwrap_or_else(|| SourceReport::new(source))
            })
            .collect();

        CommentaryStore {
            entries: self.entries,
            report: LoadReport { sources },
        }
    }
}

impl Default for CommentaryStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable verse-keyed commentary index
#[derive(Debug, Default)]
pub struct CommentaryStore {
    entries: HashMap<VerseKey, Vec<CommentaryEntry>>,
    report: LoadReport,
}

impl CommentaryStore {
    pub fn builder() -> CommentaryStoreBuilder {
        CommentaryStoreBuilder::new()
    }

    /// All entries for a verse, in ingestion order
    pub fn commentaries(&self, abbreviation: &str, chapter: u32, verse: u32) -> &[CommentaryEntry] {
        self.entries
            .get(&VerseKey::new(abbreviation, chapter, verse))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Entries for a verse grouped by source in priority order
    ///
    /// Sources with nothing for this verse are left out.
    pub fn commentaries_by_source(
        &self,
        abbreviation: &str,
        chapter: u32,
        verse: u32,
    ) -> Vec<SourceGroup<'_>> {
        let all = self.commentaries(abbreviation, chapter, verse);

        CommentarySource::PRIORITY
            .into_iter()
            .filter_map(|source| {
                let entries: Vec<_> = all.iter().filter(|e| e.source == source).collect();
                (!entries.is_empty()).then_some(SourceGroup { source, entries })
            })
            .collect()
    }

    pub fn has_commentary(&self, abbreviation: &str, chapter: u32, verse: u32) -> bool {
        !self.commentaries(abbreviation, chapter, verse).is_empty()
    }

    /// Sources that have something for this verse, in priority order
    pub fn available_sources(
        &self,
        abbreviation: &str,
        chapter: u32,
        verse: u32,
    ) -> Vec<CommentarySource> {
        self.commentaries_by_source(abbreviation, chapter, verse)
            .into_iter()
            .map(|group| group.source)
            .collect()
    }

    /// Number of distinct verses with commentary
    pub fn verse_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries across all verses
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// What happened while each source was loaded
    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(sources: &[(CommentarySource, &str)]) -> CommentaryStore {
        let mut builder = CommentaryStore::builder();
        for (source, content) in sources {
            builder.ingest_str(*source, content);
        }
        builder.build()
    }

    #[test]
    fn single_row_is_indexed() {
        let store = store_with(&[(CommentarySource::Haydock, "Gn\t1:1\tIn the beginning...")]);

        assert!(store.has_commentary("Gn", 1, 1));
        let entries = store.commentaries("Gn", 1, 1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "In the beginning...");
        assert_eq!(entries[0].source, CommentarySource::Haydock);
    }

    #[test]
    fn absent_key_is_empty() {
        let store = store_with(&[(CommentarySource::Haydock, "Gn\t1:1\tx")]);
        assert!(store.commentaries("Gn", 1, 2).is_empty());
        assert!(!store.has_commentary("Ex", 1, 1));
        assert!(store.commentaries_by_source("Gn", 2, 1).is_empty());
        assert_eq!(store.verse_count(), 1);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let content = "Gn\t1:1\tgood\nGn\t1:2\nGn\tx:3\tbad chapter\nGn\t1\tno verse\nGn\t1:2:3\ttoo many\nGn\t1:4\talso good";
        let store = store_with(&[(CommentarySource::Haydock, content)]);

        assert_eq!(store.entry_count(), 2);
        assert!(store.has_commentary("Gn", 1, 1));
        assert!(store.has_commentary("Gn", 1, 4));
        assert!(!store.has_commentary("Gn", 1, 2));

        let report = store.report().source(CommentarySource::Haydock).unwrap();
        assert!(report.found);
        assert_eq!(report.entries, 2);
        assert_eq!(report.skipped, 4);
    }

    #[test]
    fn header_only_on_first_line() {
        let content = "BOOK\tref\ttext\nBook\t1:1\tnot a header here\n";
        let store = store_with(&[(CommentarySource::Lapide, content)]);

        assert_eq!(store.entry_count(), 1);
        assert!(store.has_commentary("Book", 1, 1));
        assert_eq!(store.report().total_skipped(), 0);
    }

    #[test]
    fn parse_row_errors() {
        let source = CommentarySource::Haydock;
        assert_eq!(parse_row(source, 3, "Gn\t1:1"), Err(RowError::TooFewFields(2)));
        assert_eq!(
            parse_row(source, 3, "Gn\t1-1\tt"),
            Err(RowError::BadReference("1-1".to_string()))
        );
        assert_eq!(parse_row(source, 0, "book\tref\ttext"), Ok(None));
    }

    #[test]
    fn negative_reference_is_malformed() {
        assert_eq!(
            parse_row(CommentarySource::Haydock, 1, "Gn\t-1:2\tx"),
            Err(RowError::BadReference("-1:2".to_string()))
        );
    }

    #[test]
    fn lone_carriage_return_separates_rows() {
        let store = store_with(&[(CommentarySource::Haydock, "Gn\t1:1\tfirst\rGn\t1:2\tsecond")]);
        assert_eq!(store.commentaries("Gn", 1, 1)[0].text, "first");
        assert_eq!(store.commentaries("Gn", 1, 2)[0].text, "second");
        assert_eq!(store.report().total_skipped(), 0);
    }

    #[test]
    fn blank_records_are_not_counted() {
        let content = "Book\tref\ttext\r\n\r\nGn\t1:1\tfirst\r\n\nGn\t1:2\tsecond\r\n";
        let store = store_with(&[(CommentarySource::Haydock, content)]);
        assert_eq!(store.entry_count(), 2);
        assert_eq!(store.report().total_skipped(), 0);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let entry = parse_row(CommentarySource::Haydock, 1, "Gn\t1:1\tfirst\tsecond")
            .unwrap()
            .unwrap();
        assert_eq!(entry.text, "first");
    }

    #[test]
    fn entries_keep_ingestion_order() {
        let store = store_with(&[(CommentarySource::Haydock, "Gn\t1:1\tone\nGn\t1:1\ttwo\nGn\t1:1\tthree")]);
        let texts: Vec<_> = store.commentaries("Gn", 1, 1).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn grouping_follows_priority_not_scan_order() {
        let store = store_with(&[
            (CommentarySource::Douai1609, "Jn\t1:1\tdouai note"),
            (CommentarySource::Lapide, "Jn\t1:1\tlapide note\nJn\t1:1\tlapide again"),
        ]);

        assert_eq!(
            store.available_sources("Jn", 1, 1),
            vec![CommentarySource::Lapide, CommentarySource::Douai1609]
        );

        let groups = store.commentaries_by_source("Jn", 1, 1);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].source, CommentarySource::Lapide);
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[1].entries[0].text, "douai note");
    }

    #[test]
    fn colon_in_abbreviation_does_not_collide() {
        let store = store_with(&[(CommentarySource::Haydock, "A:1\t2:3\tfirst\nA\t1:2\tsecond")]);
        assert_eq!(store.commentaries("A:1", 2, 3).len(), 1);
        assert_eq!(store.commentaries("A", 1, 2).len(), 1);
        assert_eq!(store.commentaries("A", 1, 2)[0].text, "second");
    }

    #[test]
    fn missing_source_is_reported_not_fatal() {
        let mut builder = CommentaryStore::builder();
        builder
            .mark_missing(CommentarySource::Haydock)
            .ingest_str(CommentarySource::Lapide, "Gn\t1:1\tnote");
        let store = builder.build();

        assert_eq!(store.available_sources("Gn", 1, 1), vec![CommentarySource::Lapide]);

        let report = store.report();
        assert_eq!(report.sources.len(), 3);
        assert!(!report.source(CommentarySource::Haydock).unwrap().found);
        assert!(!report.source(CommentarySource::Douai1609).unwrap().found);
        assert_eq!(report.total_entries(), 1);
    }

    #[test]
    fn source_identity() {
        assert_eq!(CommentarySource::Lapide.display_name(), "Cornelius à Lapide");
        assert_eq!(CommentarySource::Douai1609.resource_name(), "douai-1609.tsv");
        assert_eq!("LAPIDE".parse::<CommentarySource>(), Ok(CommentarySource::Lapide));
        assert!("calmet".parse::<CommentarySource>().is_err());
        assert_eq!(
            serde_json::to_value(CommentarySource::Douai1609).unwrap(),
            serde_json::json!("douai-1609")
        );
    }

    #[test]
    fn store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CommentaryStore>();
    }
}
