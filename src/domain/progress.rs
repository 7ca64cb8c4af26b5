//! Reading plan progress
//!
//! Tracks when the reader started the plan and which days they have marked
//! as read. The current day is derived from the start date, never stored.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::plan::{DailyReading, ReadingPlan, PLAN_DAYS};

/// How many days past today the upcoming list shows
pub const UPCOMING_WINDOW: u32 = 6;

/// A reader's position in the plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanProgress {
    /// Day the plan was started, `None` until the reader begins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_on: Option<NaiveDate>,

    /// Days marked as read
    #[serde(default)]
    pub completed: BTreeSet<u32>,
}

impl PlanProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once a start date is set
    pub fn is_started(&self) -> bool {
        self.started_on.is_some()
    }

    /// Starts (or restarts) the plan on `date`, keeping completed days
    pub fn start(&mut self, date: NaiveDate) {
        self.started_on = Some(date);
    }

    /// Clears the start date and every completed day
    pub fn reset(&mut self) {
        self.started_on = None;
        self.completed.clear();
    }

    /// The plan day that falls on `today`
    ///
    /// Day 1 before the plan is started; otherwise days elapsed since the
    /// start plus one, clamped to the plan length.
    pub fn current_day(&self, today: NaiveDate) -> u32 {
        let Some(start) = self.started_on else {
            return 1;
        };
        let elapsed = (today - start).num_days().saturating_add(1);
        elapsed.clamp(1, PLAN_DAYS as i64) as u32
    }

    /// Marks `day` as read; returns false if it already was
    pub fn mark_completed(&mut self, day: u32) -> bool {
        self.completed.insert(day.clamp(1, PLAN_DAYS))
    }

    pub fn is_completed(&self, day: u32) -> bool {
        self.completed.contains(&day)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Share of the plan marked as read, in `0.0..=1.0`
    pub fn fraction_complete(&self) -> f64 {
        self.completed_count() as f64 / PLAN_DAYS as f64
    }

    /// The readings after today's, up to [`UPCOMING_WINDOW`] of them
    pub fn upcoming<'p>(&self, plan: &'p ReadingPlan, today: NaiveDate) -> Vec<&'p DailyReading> {
        let current = self.current_day(today);
        let last = (current + UPCOMING_WINDOW).min(PLAN_DAYS);
        (current + 1..=last).map(|day| plan.day(day)).collect()
    }
}
