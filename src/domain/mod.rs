//! Domain models for the Douay reader
//!
//! Contains the core logic without any I/O concerns: the canonical corpus,
//! the reading plan built from it, passage resolution, the commentary index
//! and plan progress.

mod corpus;
mod passage;
mod plan;
mod commentary;
mod progress;

pub use corpus::{Book, ChapterCorpus, ChapterUnit, CANON};
pub use passage::{parse as parse_passage, ParsedPassage};
pub use plan::{DailyReading, PassageRange, ReadingPlan, PLAN_DAYS};
pub use commentary::{
    parse_row, CommentaryEntry, CommentarySource, CommentaryStore, CommentaryStoreBuilder,
    LoadReport, RowError, SourceGroup, SourceReport, VerseKey,
};
pub use progress::{PlanProgress, UPCOMING_WINDOW};
