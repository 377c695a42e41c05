//! Derived views over a snapshot of the log store.
//!
//! Everything here is recomputed on demand from a slice of entries. The
//! store guarantees entries are well-formed, so there are no shape checks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::entry::{LogEntry, Workout};

/// Workouts in insertion order, paired with their entry.
pub fn workouts(entries: &[LogEntry]) -> impl Iterator<Item = (&LogEntry, &Workout)> {
    entries
        .iter()
        .filter_map(|entry| entry.as_workout().map(|workout| (entry, workout)))
}

/// True if any workout is logged on `date`.
pub fn has_workout_on(entries: &[LogEntry], date: NaiveDate) -> bool {
    workouts(entries).any(|(entry, _)| entry.date == date)
}

/// Workouts logged on `date`, in insertion order.
pub fn workouts_on(entries: &[LogEntry], date: NaiveDate) -> Vec<&LogEntry> {
    workouts(entries)
        .filter(|(entry, _)| entry.date == date)
        .map(|(entry, _)| entry)
        .collect()
}

pub fn total_workouts(entries: &[LogEntry]) -> usize {
    workouts(entries).count()
}

/// Sum of reps times weight over every set of every workout.
pub fn total_volume(entries: &[LogEntry]) -> f64 {
    workouts(entries).map(|(_, workout)| workout.volume()).sum()
}

/// Workouts logged on `today`, latest first.
///
/// The sort is stable: workouts with the same time keep insertion order.
pub fn todays_workouts(entries: &[LogEntry], today: NaiveDate) -> Vec<&LogEntry> {
    let mut todays = workouts_on(entries, today);
    todays.sort_by(|a, b| b.time.cmp(&a.time));
    todays
}

/// All entries, most recent first. Ties keep insertion order.
pub fn newest_first(entries: &[LogEntry]) -> Vec<&LogEntry> {
    let mut sorted: Vec<&LogEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
    sorted
}

/// Figures shown on the home view.
#[derive(Debug, Clone, Serialize)]
pub struct HomeStats<'a> {
    pub total_workouts: usize,
    pub total_volume: f64,
    pub todays_workouts: Vec<&'a LogEntry>,
}

pub fn home_stats(entries: &[LogEntry], today: NaiveDate) -> HomeStats<'_> {
    HomeStats {
        total_workouts: total_workouts(entries),
        total_volume: total_volume(entries),
        todays_workouts: todays_workouts(entries, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Activity, Exercise, Mindset, Set};
    use crate::types::LogTime;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> LogTime {
        s.parse().unwrap()
    }

    fn workout_at(day: &str, at: &str, title: &str, sets: Vec<Set>) -> LogEntry {
        LogEntry::workout(
            date(day),
            time(at),
            Workout {
                title: Some(title.to_string()),
                exercises: vec![Exercise::new("Bench Press", sets)],
                note: None,
            },
        )
    }

    fn mindset_at(day: &str, at: &str) -> LogEntry {
        LogEntry::new(
            date(day),
            time(at),
            Activity::Mindset(Mindset {
                mood: "calm".into(),
                notes: String::new(),
            }),
        )
    }

    fn titles(entries: &[&LogEntry]) -> Vec<String> {
        entries
            .iter()
            .filter_map(|e| e.as_workout().and_then(|w| w.title.clone()))
            .collect()
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "volumes of whole numbers are exact")]
    fn single_bench_press_workout() {
        let entries = vec![workout_at(
            "2024-01-15",
            "08:00",
            "Push",
            vec![Set::new(5, 135.0), Set::new(5, 135.0)],
        )];

        assert_eq!(total_volume(&entries), 1350.0);
        assert_eq!(total_workouts(&entries), 1);
        assert!(has_workout_on(&entries, date("2024-01-15")));
        assert!(!has_workout_on(&entries, date("2024-01-16")));
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "volumes of whole numbers are exact")]
    fn total_volume_matches_manual_sum() {
        let entries = vec![
            workout_at("2024-01-14", "07:00", "A", vec![Set::new(10, 50.0), Set::new(8, 60.0)]),
            mindset_at("2024-01-14", "09:00"),
            workout_at("2024-01-15", "18:30", "B", vec![Set::new(3, 200.0), Set::new(12, 0.0)]),
        ];

        let expected: f64 = entries
            .iter()
            .filter_map(LogEntry::as_workout)
            .flat_map(|w| &w.exercises)
            .flat_map(|e| &e.sets)
            .map(|s| f64::from(s.reps) * s.weight)
            .sum();
        assert_eq!(total_volume(&entries), expected);
        assert_eq!(total_volume(&entries), 1580.0);
        assert_eq!(total_workouts(&entries), 2);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact zero")]
    fn empty_snapshot_has_zero_totals() {
        assert_eq!(total_volume(&[]), 0.0);
        assert_eq!(total_workouts(&[]), 0);
        assert!(workouts_on(&[], date("2024-01-15")).is_empty());
    }

    #[test]
    fn non_workouts_do_not_count_as_workout_days() {
        let entries = vec![mindset_at("2024-01-15", "08:00")];
        assert!(!has_workout_on(&entries, date("2024-01-15")));
        assert!(workouts_on(&entries, date("2024-01-15")).is_empty());
    }

    #[test]
    fn workouts_on_keeps_insertion_order_and_is_idempotent() {
        let entries = vec![
            workout_at("2024-01-15", "09:00", "first", vec![Set::new(1, 1.0)]),
            workout_at("2024-01-16", "09:00", "other day", vec![Set::new(1, 1.0)]),
            workout_at("2024-01-15", "07:00", "second", vec![Set::new(1, 1.0)]),
        ];

        let first = workouts_on(&entries, date("2024-01-15"));
        let second = workouts_on(&entries, date("2024-01-15"));
        assert_eq!(first, second);
        assert_eq!(titles(&first), ["first", "second"]);
    }

    #[test]
    fn todays_workouts_are_latest_first() {
        let entries = vec![
            workout_at("2024-01-15", "07:00", "morning", vec![Set::new(1, 1.0)]),
            workout_at("2024-01-15", "09:00", "later", vec![Set::new(1, 1.0)]),
            workout_at("2024-01-14", "23:00", "yesterday", vec![Set::new(1, 1.0)]),
        ];

        let today = todays_workouts(&entries, date("2024-01-15"));
        assert_eq!(titles(&today), ["later", "morning"]);
    }

    #[test]
    fn todays_workouts_sort_is_stable_for_equal_times() {
        let entries = vec![
            workout_at("2024-01-15", "08:00", "a", vec![Set::new(1, 1.0)]),
            workout_at("2024-01-15", "08:00", "b", vec![Set::new(1, 1.0)]),
        ];
        let today = todays_workouts(&entries, date("2024-01-15"));
        assert_eq!(titles(&today), ["a", "b"]);
    }

    #[test]
    fn newest_first_orders_across_days() {
        let entries = vec![
            workout_at("2024-01-14", "20:00", "old", vec![Set::new(1, 1.0)]),
            workout_at("2024-01-15", "06:00", "new", vec![Set::new(1, 1.0)]),
            workout_at("2024-01-13", "23:00", "oldest", vec![Set::new(1, 1.0)]),
        ];
        assert_eq!(titles(&newest_first(&entries)), ["new", "old", "oldest"]);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "volumes of whole numbers are exact")]
    fn home_stats_bundles_totals() {
        let entries = vec![
            workout_at("2024-01-15", "07:00", "a", vec![Set::new(5, 100.0)]),
            workout_at("2024-01-10", "07:00", "b", vec![Set::new(5, 100.0)]),
        ];
        let stats = home_stats(&entries, date("2024-01-15"));
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_volume, 1000.0);
        assert_eq!(titles(&stats.todays_workouts), ["a"]);
    }
}
