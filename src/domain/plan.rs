//! One-year reading plan
//!
//! Spreads every chapter of the corpus over 365 days, in order, as evenly as
//! ceiling division allows. Runs of consecutive chapters in the same book are
//! collapsed into ranges such as `"Genesis 1-4"`.

use std::fmt;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use super::corpus::{Book, ChapterCorpus, ChapterUnit};

/// Number of days in the plan
pub const PLAN_DAYS: u32 = 365;

/// A run of consecutive chapters within one book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassageRange {
    pub book: &'static Book,
    pub start: u32,
    pub end: u32,
}

impl PassageRange {
    /// Returns true if the range covers a single chapter
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Expands the range back into chapter units
    pub fn units(&self) -> impl Iterator<Item = ChapterUnit> + '_ {
        (self.start..=self.end).map(|chapter| ChapterUnit {
            book: self.book,
            chapter,
        })
    }
}

impl fmt::Display for PassageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{} {}", self.book.name, self.start)
        } else {
            write!(f, "{} {}-{}", self.book.name, self.start, self.end)
        }
    }
}

impl Serialize for PassageRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The passages assigned to one day of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReading {
    pub day: u32,
    pub passages: Vec<PassageRange>,
}

impl DailyReading {
    /// Passage descriptors as display strings
    pub fn passage_strings(&self) -> Vec<String> {
        self.passages.iter().map(ToString::to_string).collect()
    }

    /// Number of chapters assigned to this day
    pub fn chapter_count(&self) -> usize {
        self.passages
            .iter()
            .map(|p| (p.end - p.start + 1) as usize)
            .sum()
    }
}

/// A complete reading plan, one entry per day
#[derive(Debug, Clone, Serialize)]
pub struct ReadingPlan {
    days: Vec<DailyReading>,
}

impl ReadingPlan {
    /// The plan over the canonical corpus, computed once per process
    pub fn canonical() -> &'static ReadingPlan {
        static PLAN: OnceLock<ReadingPlan> = OnceLock::new();
        PLAN.get_or_init(|| ReadingPlan::generate(&ChapterCorpus::canonical()))
    }

    /// Builds the 365-day plan for a corpus
    pub fn generate(corpus: &ChapterCorpus) -> Self {
        let units: Vec<ChapterUnit> = corpus.units().collect();
        Self {
            days: distribute(&units, PLAN_DAYS),
        }
    }

    /// The reading for `day`, clamped to the plan's range
    pub fn day(&self, day: u32) -> &DailyReading {
        let last = self.days.len().max(1) as u32;
        let index = day.clamp(1, last) - 1;
        &self.days[index as usize]
    }

    /// All days in order
    pub fn days(&self) -> &[DailyReading] {
        &self.days
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyReading> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Splits `units` into `days` buckets.
///
/// Each day takes `ceil(remaining / days_left)` units (at least one), so the
/// cursor lands exactly on the end after the final day. If the units run out
/// early the remaining days are emitted with no passages.
fn distribute(units: &[ChapterUnit], days: u32) -> Vec<DailyReading> {
    let total = units.len();
    let mut readings = Vec::with_capacity(days as usize);
    let mut idx = 0;

    for day in 1..=days {
        let remaining = total - idx;
        let days_left = (days + 1 - day) as usize;
        let today = remaining.div_ceil(days_left).max(1);
        let end = (idx + today).min(total);

        readings.push(DailyReading {
            day,
            passages: collapse_runs(&units[idx..end]),
        });
        idx = end;
    }

    readings
}

/// Collapses maximal same-book consecutive-chapter runs into ranges
fn collapse_runs(units: &[ChapterUnit]) -> Vec<PassageRange> {
    let mut ranges: Vec<PassageRange> = Vec::new();

    for unit in units {
        match ranges.last_mut() {
            Some(last) if last.book == unit.book && unit.chapter == last.end + 1 => {
                last.end = unit.chapter;
            }
            _ => ranges.push(PassageRange {
                book: unit.book,
                start: unit.chapter,
                end: unit.chapter,
            }),
        }
    }

    ranges
}
