//! Reading plan CLI commands

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::app::Settings;
use super::output::Output;
use crate::domain::{DailyReading, PlanProgress, ReadingPlan, PLAN_DAYS};
use crate::storage::ProgressStore;

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the reading for a day (clamped to 1-365)
    Show {
        /// Day of the plan
        day: u32,
    },

    /// Show today's reading
    Today,

    /// Show the readings for the next few days
    Upcoming,

    /// Start the plan today, or on the given date
    Start {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Mark a day as read (defaults to today's day)
    Done {
        /// Day of the plan
        day: Option<u32>,
    },

    /// Show progress through the plan
    Status,

    /// Forget the start date and all completed days
    Reset,
}

pub fn run(cmd: PlanCommands, output: &Output, settings: &Settings) -> Result<()> {
    let store = ProgressStore::new(&settings.progress_file);
    let plan = ReadingPlan::canonical();
    let today = Local::now().date_naive();

    match cmd {
        PlanCommands::Show { day } => {
            if !(1..=PLAN_DAYS).contains(&day) {
                output.verbose_ctx("plan", &format!("Day {} clamped to plan range", day));
            }
            let progress = store.load()?;
            print_reading(output, plan.day(day), &progress)
        }
        PlanCommands::Today => today_reading(output, &store, plan, today),
        PlanCommands::Upcoming => upcoming(output, &store, plan, today),
        PlanCommands::Start { date } => start(output, &store, date.unwrap_or(today)),
        PlanCommands::Done { day } => done(output, &store, day, today),
        PlanCommands::Status => status(output, &store, today),
        PlanCommands::Reset => reset(output, &store),
    }
}

fn print_reading(output: &Output, reading: &DailyReading, progress: &PlanProgress) -> Result<()> {
    let completed = progress.is_completed(reading.day);

    if output.is_json() {
        output.data(&serde_json::json!({
            "day": reading.day,
            "passages": reading.passage_strings(),
            "chapters": reading.chapter_count(),
            "completed": completed,
        }));
    } else {
        let mark = if completed { " [x]" } else { "" };
        println!("Day {} of {}{}", reading.day, PLAN_DAYS, mark);
        for passage in &reading.passages {
            println!("  {}", passage);
        }
    }

    Ok(())
}

fn today_reading(
    output: &Output,
    store: &ProgressStore,
    plan: &ReadingPlan,
    today: NaiveDate,
) -> Result<()> {
    let progress = store.load()?;
    if !progress.is_started() {
        output.verbose_ctx("plan", "Plan not started, showing day 1");
    }

    let day = progress.current_day(today);
    print_reading(output, plan.day(day), &progress)
}

fn upcoming(
    output: &Output,
    store: &ProgressStore,
    plan: &ReadingPlan,
    today: NaiveDate,
) -> Result<()> {
    let progress = store.load()?;
    let readings = progress.upcoming(plan, today);
    output.verbose_ctx("plan", &format!("{} upcoming days", readings.len()));

    if output.is_json() {
        let items: Vec<_> = readings
            .iter()
            .map(|r| {
                serde_json::json!({
                    "day": r.day,
                    "passages": r.passage_strings(),
                    "completed": progress.is_completed(r.day),
                })
            })
            .collect();
        output.data(&items);
    } else if readings.is_empty() {
        println!("No upcoming readings.");
    } else {
        println!("{:<6} PASSAGES", "DAY");
        println!("{}", "-".repeat(50));
        for reading in readings {
            let mark = if progress.is_completed(reading.day) { " [x]" } else { "" };
            println!(
                "{:<6} {}{}",
                reading.day,
                reading.passage_strings().join(", "),
                mark
            );
        }
    }

    Ok(())
}

fn start(output: &Output, store: &ProgressStore, date: NaiveDate) -> Result<()> {
    store.update(|p| p.start(date))?;
    output.verbose_ctx("plan", &format!("Saved progress to {}", store.path().display()));
    output.success(&format!("Started reading plan on {}", date));
    Ok(())
}

fn done(output: &Output, store: &ProgressStore, day: Option<u32>, today: NaiveDate) -> Result<()> {
    let (progress, (day, newly)) = store.update(|p| {
        let day = day.unwrap_or_else(|| p.current_day(today)).clamp(1, PLAN_DAYS);
        (day, p.mark_completed(day))
    })?;

    if newly {
        output.success(&format!(
            "Marked day {} as read ({} of {} complete)",
            day,
            progress.completed_count(),
            PLAN_DAYS
        ));
    } else {
        output.success(&format!("Day {} was already marked as read", day));
    }

    Ok(())
}

fn status(output: &Output, store: &ProgressStore, today: NaiveDate) -> Result<()> {
    let progress = store.load()?;
    let current = progress.current_day(today);

    if output.is_json() {
        output.data(&serde_json::json!({
            "started_on": progress.started_on,
            "current_day": current,
            "completed": progress.completed_count(),
            "total_days": PLAN_DAYS,
            "percent": (progress.fraction_complete() * 100.0).round(),
        }));
        return Ok(());
    }

    println!("Reading Plan");
    println!("{}", "=".repeat(40));
    match progress.started_on {
        Some(date) => {
            println!("Started:   {}", date);
            println!("Day {} of {}", current, PLAN_DAYS);
        }
        None => println!("Not started. Run 'douay plan start' to begin."),
    }
    println!(
        "{} of {} days completed ({:.0}%)",
        progress.completed_count(),
        PLAN_DAYS,
        progress.fraction_complete() * 100.0
    );

    Ok(())
}

fn reset(output: &Output, store: &ProgressStore) -> Result<()> {
    store.update(PlanProgress::reset)?;
    output.success("Reading plan reset");
    Ok(())
}
