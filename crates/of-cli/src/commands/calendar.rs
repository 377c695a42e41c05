//! Month calendar with workout markers, plus the workouts of one day.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use serde::Serialize;

use of_core::views::workouts_on;
use of_core::{LogEntry, MonthGrid, Workout, YearMonth, day_label, month_grid};

use crate::commands::stats::load_store;
use crate::config::{Config, WeightUnit};
use crate::render::workout_card;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Snapshot file written by the shell's `export` (defaults to the
    /// configured export path).
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Month to show (YYYY-MM). Defaults to the month of `--day`, then of
    /// today.
    #[arg(long)]
    pub month: Option<YearMonth>,

    /// Day to list workouts for (YYYY-MM-DD).
    #[arg(long)]
    pub day: Option<NaiveDate>,

    /// Date to treat as today (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// The day whose workouts are listed under the grid: an explicit day, or
/// today when it falls inside the shown month.
pub fn selected_day(
    month: YearMonth,
    day: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    day.or_else(|| (YearMonth::of(today) == month).then_some(today))
}

// ========== Human-Readable Output ==========

/// Monday-first month grid. Days with a workout carry a `*`.
pub fn format_month(grid: &MonthGrid) -> String {
    let mut output = String::new();

    let title = YearMonth::new(grid.year, grid.month)
        .map_or_else(|| format!("{}-{:02}", grid.year, grid.month), YearMonth::title);
    writeln!(output, "{title}").unwrap();

    let header: String = WEEKDAYS.iter().map(|name| format!("{name:>3} ")).collect();
    writeln!(output, "{}", header.trim_end()).unwrap();

    let lead = grid
        .days
        .first()
        .map_or(0, |day| day.date.weekday().num_days_from_monday() as usize);
    let mut row = "    ".repeat(lead);
    let mut column = lead;

    for day in &grid.days {
        let mark = if day.has_workout { '*' } else { ' ' };
        write!(row, "{:>3}{mark}", day.day).unwrap();
        column += 1;
        if column == 7 {
            writeln!(output, "{}", row.trim_end()).unwrap();
            row.clear();
            column = 0;
        }
    }
    if !row.is_empty() {
        writeln!(output, "{}", row.trim_end()).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "* = workout logged").unwrap();
    output
}

pub fn format_day(
    entries: &[LogEntry],
    date: NaiveDate,
    today: NaiveDate,
    unit: WeightUnit,
) -> String {
    let mut output = String::new();

    let label = day_label(date, today);
    writeln!(output, "{label}").unwrap();
    writeln!(output, "{}", "─".repeat(label.chars().count())).unwrap();

    let day_entries = workouts_on(entries, date);
    if day_entries.is_empty() {
        writeln!(output, "No workouts logged for this day.").unwrap();
        return output;
    }

    for entry in day_entries {
        if let Some(workout) = entry.as_workout() {
            output.push_str(&workout_card(entry, workout, unit));
        }
    }

    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonDayWorkout<'a> {
    pub id: &'a str,
    pub time: String,
    pub volume: f64,
    #[serde(flatten)]
    pub workout: &'a Workout,
}

#[derive(Debug, Serialize)]
pub struct JsonCalendar<'a> {
    #[serde(flatten)]
    pub grid: &'a MonthGrid,
    pub selected_day: Option<NaiveDate>,
    pub day_workouts: Vec<JsonDayWorkout<'a>>,
}

pub fn format_calendar_json(
    entries: &[LogEntry],
    grid: &MonthGrid,
    selected: Option<NaiveDate>,
) -> Result<String> {
    let day_workouts = selected
        .map(|date| workouts_on(entries, date))
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| {
            entry.as_workout().map(|workout| JsonDayWorkout {
                id: entry.id.as_str(),
                time: entry.time.to_string(),
                volume: workout.volume(),
                workout,
            })
        })
        .collect();

    let json = JsonCalendar {
        grid,
        selected_day: selected,
        day_workouts,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

// ========== Public Interface ==========

pub fn run(args: &CalendarArgs, config: &Config) -> Result<()> {
    let path = args.input.as_deref().unwrap_or(&config.export_path);
    let store = load_store(path)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let month = args
        .month
        .unwrap_or_else(|| YearMonth::of(args.day.unwrap_or(today)));

    let grid = month_grid(store.entries(), month);
    let selected = selected_day(month, args.day, today);

    if args.json {
        println!("{}", format_calendar_json(store.entries(), &grid, selected)?);
        return Ok(());
    }

    print!("{}", format_month(&grid));
    if let Some(date) = selected {
        println!();
        print!("{}", format_day(store.entries(), date, today, config.weight_unit));
    }

    Ok(())
}
