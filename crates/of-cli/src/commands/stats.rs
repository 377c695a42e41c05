//! Home view: total workouts, total volume, and today's workouts.
//!
//! Backs both `of stats`, which reads an exported snapshot, and the `stats`
//! command of the shell.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;

use of_core::{HomeStats, LogEntry, home_stats};
use of_store::{LogStore, codec};

use crate::config::{Config, WeightUnit};
use crate::render::{format_volume, workout_summary};

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Snapshot file written by the shell's `export` (defaults to the
    /// configured export path).
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Date to treat as today (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Reads a snapshot file into a store, applying the store's entry checks.
pub fn load_store(path: &Path) -> Result<LogStore> {
    let entries =
        codec::read_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    LogStore::from_entries(entries)
        .with_context(|| format!("invalid entry in {}", path.display()))
}

// ========== Human-Readable Output ==========

pub fn format_home(stats: &HomeStats<'_>, unit: WeightUnit) -> String {
    let mut output = String::new();

    writeln!(output, "OmniaFortis").unwrap();
    writeln!(output, "Strength in Everything.").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Workouts:      {}", stats.total_workouts).unwrap();
    writeln!(
        output,
        "Total volume:  {}",
        format_volume(stats.total_volume, unit)
    )
    .unwrap();
    writeln!(output).unwrap();
    writeln!(output, "TODAY").unwrap();
    writeln!(output, "─────").unwrap();

    if stats.todays_workouts.is_empty() {
        writeln!(output, "No workouts logged today.").unwrap();
        return output;
    }

    for entry in &stats.todays_workouts {
        if let Some(workout) = entry.as_workout() {
            output.push_str(&workout_summary(entry, workout));
        }
    }

    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonHome<'a> {
    pub today: NaiveDate,
    pub weight_unit: WeightUnit,
    pub total_workouts: usize,
    pub total_volume: f64,
    pub todays_workouts: &'a [&'a LogEntry],
}

pub fn format_home_json(
    stats: &HomeStats<'_>,
    today: NaiveDate,
    unit: WeightUnit,
) -> Result<String> {
    let json = JsonHome {
        today,
        weight_unit: unit,
        total_workouts: stats.total_workouts,
        total_volume: stats.total_volume,
        todays_workouts: &stats.todays_workouts,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

// ========== Public Interface ==========

pub fn run(args: &StatsArgs, config: &Config) -> Result<()> {
    let path = args.input.as_deref().unwrap_or(&config.export_path);
    let store = load_store(path)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let stats = home_stats(store.entries(), today);

    if args.json {
        println!("{}", format_home_json(&stats, today, config.weight_unit)?);
    } else {
        print!("{}", format_home(&stats, config.weight_unit));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use of_core::{Exercise, LogId, Set, Workout};

    fn workout(id: &str, date: &str, time: &str, title: &str, sets: Vec<Set>) -> LogEntry {
        LogEntry {
            id: LogId::new(id).unwrap(),
            ..LogEntry::workout(
                date.parse().unwrap(),
                time.parse().unwrap(),
                Workout {
                    title: Some(title.to_string()),
                    exercises: vec![Exercise::new("Bench Press", sets)],
                    note: None,
                },
            )
        }
    }

    fn today() -> NaiveDate {
        "2024-01-15".parse().unwrap()
    }

    #[test]
    fn test_home_empty_store() {
        let stats = home_stats(&[], today());
        assert_snapshot!(format_home(&stats, WeightUnit::Lbs).trim_end(), @r"
OmniaFortis
Strength in Everything.

Workouts:      0
Total volume:  0 lbs

TODAY
─────
No workouts logged today.
");
    }

    #[test]
    fn test_home_lists_todays_workouts_latest_first() {
        let entries = vec![
            workout("aaa111xyz", "2024-01-15", "07:00", "Early", vec![Set::new(5, 100.0)]),
            workout("bbb222xyz", "2024-01-14", "09:00", "Yesterday", vec![Set::new(5, 135.0)]),
            workout("ccc333xyz", "2024-01-15", "09:00", "Late", vec![Set::new(10, 135.0)]),
        ];
        let stats = home_stats(&entries, today());

        assert_snapshot!(format_home(&stats, WeightUnit::Lbs).trim_end(), @r"
OmniaFortis
Strength in Everything.

Workouts:      3
Total volume:  2,525 lbs

TODAY
─────
Late  [ccc333]
  Jan 15, 2024 • 9:00 AM • 1 exercise
  Bench Press: 10x135
Early  [aaa111]
  Jan 15, 2024 • 7:00 AM • 1 exercise
  Bench Press: 5x100
");
    }

    #[test]
    fn test_home_json() {
        let entries = vec![workout(
            "aaa111xyz",
            "2024-01-15",
            "08:00",
            "Push",
            vec![Set::new(5, 135.0), Set::new(5, 135.0)],
        )];
        let stats = home_stats(&entries, today());
        let json = format_home_json(&stats, today(), WeightUnit::Kg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["today"], "2024-01-15");
        assert_eq!(value["weight_unit"], "kg");
        assert_eq!(value["total_workouts"], 1);
        assert_eq!(value["total_volume"], 1350.0);
        assert_eq!(value["todays_workouts"][0]["id"], "aaa111xyz");
        assert_eq!(value["todays_workouts"][0]["kind"], "workout");
    }

    #[test]
    fn test_load_store_rejects_invalid_entries() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("logs.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "entries": [
                {"id": "w-1", "date": "2024-01-15", "time": "08:00", "kind": "workout", "exercises": []}
            ]}"#,
        )
        .unwrap();

        let err = load_store(&path).unwrap_err();
        assert!(format!("{err:#}").contains("workout has no exercises"));
    }
}
