//! Commentary resource loader
//!
//! Reads one tab-separated file per source from a directory and builds the
//! immutable [`CommentaryStore`]. A source whose file is missing or
//! unreadable contributes nothing; the others still load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{CommentarySource, CommentaryStore};

/// Loads commentary resources from a directory
pub struct CommentaryLoader {
    dir: PathBuf,
}

impl CommentaryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory resources are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the resource for `source`
    pub fn resource_path(&self, source: CommentarySource) -> PathBuf {
        self.dir.join(source.resource_name())
    }

    /// Reads every source in priority order and returns the finished store
    pub fn load(&self) -> CommentaryStore {
        let mut builder = CommentaryStore::builder();

        for source in CommentarySource::PRIORITY {
            let path = self.resource_path(source);
            match fs::read_to_string(&path) {
                Ok(content) => {
                    let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);
                    builder.ingest_str(source, content);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(source = source.id(), path = %path.display(), "Commentary resource not found");
                    builder.mark_missing(source);
                }
                Err(e) => {
                    tracing::warn!(source = source.id(), path = %path.display(), error = %e, "Failed to read commentary resource");
                    builder.mark_missing(source);
                }
            }
        }

        let store = builder.build();
        tracing::info!(
            verses = store.verse_count(),
            entries = store.entry_count(),
            skipped = store.report().total_skipped(),
            "Commentary loaded"
        );
        store
    }
}
