//! Douay Reader - reading plan and commentary lookup for the Douay-Rheims Bible
//!
//! The crate holds the non-visual core of a Bible reader: the canonical
//! 73-book chapter table, a one-year reading plan generated from it, passage
//! string resolution, and a verse-keyed index over three commentary sources.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    Book, ChapterCorpus, CommentaryEntry, CommentarySource, CommentaryStore, DailyReading,
    PassageRange, ReadingPlan,
};
