//! Storage layer for the training log.
//!
//! The [`LogStore`] holds every log entry of the running session in memory,
//! in insertion order. Nothing is written to disk on its own; the
//! [`codec`] module turns a snapshot into bytes and back for explicit
//! export and import.
//!
//! # Validation Boundary
//!
//! Entries are checked on the way in ([`LogStore::append`] and
//! [`LogStore::replace`]). A workout must have at least one exercise, every
//! exercise a non-blank name and only sets with reps or weight, and every
//! number must be finite and non-negative. Readers of the store can rely on
//! that shape and do no checking of their own.
//!
//! # Thread Safety
//!
//! `LogStore` is a plain owned value. It is driven from a single event loop;
//! wrap it in a `Mutex` if it ever needs to be shared.

pub mod codec;

use chrono::NaiveDate;
use thiserror::Error;

use of_core::validate::{check_non_negative, check_set, validate_exercise_name};
use of_core::{Activity, LogEntry, LogId, LogTime, ValidationError};

/// Store errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The entry failed a field check.
    #[error("invalid entry: {0}")]
    Invalid(#[from] ValidationError),
    /// A workout had no exercises.
    #[error("workout has no exercises")]
    NoExercises,
    /// An exercise contained a set with neither reps nor weight.
    #[error("exercise {exercise:?} has a set with no reps or weight")]
    BlankSet { exercise: String },
    /// No entry with this ID.
    #[error("no entry with id {0}")]
    NotFound(LogId),
    /// No entry ID starts with this prefix.
    #[error("no entry matches {prefix:?}")]
    NoMatch { prefix: String },
    /// More than one entry ID starts with this prefix.
    #[error("{prefix:?} matches {matches} entries; type more of the ID")]
    AmbiguousPrefix { prefix: String, matches: usize },
    /// An entry with this ID is already stored.
    #[error("duplicate entry id {0}")]
    DuplicateId(LogId),
}

/// In-memory collection of log entries.
#[derive(Debug, Clone, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from entries, checking each one.
    pub fn from_entries(entries: impl IntoIterator<Item = LogEntry>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for entry in entries {
            store.append(entry)?;
        }
        Ok(store)
    }

    /// Adds an entry at the end. A rejected entry leaves the store
    /// unchanged.
    pub fn append(&mut self, entry: LogEntry) -> Result<LogId, StoreError> {
        check_entry(&entry)?;
        if self.position(&entry.id).is_some() {
            return Err(StoreError::DuplicateId(entry.id));
        }
        let id = entry.id.clone();
        tracing::debug!(id = %id, kind = %entry.kind(), date = %entry.date, "appended entry");
        self.entries.push(entry);
        Ok(id)
    }

    /// Removes every entry matching `predicate`. Returns how many were
    /// removed.
    pub fn remove(&mut self, predicate: impl Fn(&LogEntry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(entry));
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(removed, "removed entries");
        }
        removed
    }

    pub fn remove_by_id(&mut self, id: &LogId) -> Option<LogEntry> {
        let index = self.position(id)?;
        tracing::debug!(id = %id, "removed entry");
        Some(self.entries.remove(index))
    }

    /// Removes workouts logged at exactly this date and time. Entries
    /// sharing only one of the two, or of another kind, are kept.
    pub fn remove_workout_at(&mut self, date: NaiveDate, time: LogTime) -> usize {
        self.remove(|entry| entry.is_workout() && entry.date == date && entry.time == time)
    }

    /// Replaces the entry `id` in place. The replacement takes over the
    /// old ID and position.
    pub fn replace(&mut self, id: &LogId, mut entry: LogEntry) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        check_entry(&entry)?;
        entry.id = id.clone();
        tracing::debug!(id = %id, kind = %entry.kind(), "replaced entry");
        self.entries[index] = entry;
        Ok(())
    }

    /// Copy of the current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    /// Borrowed view of the current contents, in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &LogId) -> Option<&LogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Looks up an entry by full ID or by a unique ID prefix.
    pub fn find(&self, id_or_prefix: &str) -> Result<&LogEntry, StoreError> {
        if let Some(exact) = self.entries.iter().find(|entry| entry.id.as_str() == id_or_prefix) {
            return Ok(exact);
        }
        let matches: Vec<&LogEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.id.as_str().starts_with(id_or_prefix))
            .collect();
        match matches.as_slice() {
            [entry] => Ok(entry),
            [] => Err(StoreError::NoMatch {
                prefix: id_or_prefix.to_string(),
            }),
            _ => Err(StoreError::AmbiguousPrefix {
                prefix: id_or_prefix.to_string(),
                matches: matches.len(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &LogId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }
}

/// Shape checks applied at the store boundary.
fn check_entry(entry: &LogEntry) -> Result<(), StoreError> {
    match &entry.activity {
        Activity::Workout(workout) => {
            if workout.exercises.is_empty() {
                return Err(StoreError::NoExercises);
            }
            for exercise in &workout.exercises {
                validate_exercise_name(&exercise.name)?;
                if exercise.sets.is_empty() {
                    return Err(ValidationError::NoValidSets.into());
                }
                for set in &exercise.sets {
                    if set.is_blank() {
                        return Err(StoreError::BlankSet {
                            exercise: exercise.name.clone(),
                        });
                    }
                    check_set(set)?;
                }
            }
        }
        Activity::Sleep(sleep) => {
            check_non_negative("duration", sleep.duration)?;
            check_non_negative("quality", sleep.quality)?;
        }
        Activity::Mindset(_) | Activity::Nutrition(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use of_core::{Exercise, Mindset, Set, Sleep, Workout};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> LogTime {
        s.parse().unwrap()
    }

    fn workout(day: &str, at: &str) -> LogEntry {
        LogEntry::workout(
            date(day),
            time(at),
            Workout {
                title: Some("Push".into()),
                exercises: vec![Exercise::new(
                    "Bench Press",
                    vec![Set::new(5, 135.0), Set::new(5, 135.0)],
                )],
                note: None,
            },
        )
    }

    fn mindset(day: &str, at: &str) -> LogEntry {
        LogEntry::new(
            date(day),
            time(at),
            Activity::Mindset(Mindset {
                mood: "steady".into(),
                notes: String::new(),
            }),
        )
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = LogStore::new();
        let late = workout("2024-01-16", "09:00");
        let early = workout("2024-01-15", "08:00");
        store.append(late.clone()).unwrap();
        store.append(early.clone()).unwrap();

        assert_eq!(store.snapshot(), vec![late, early]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut store = LogStore::new();
        store.append(workout("2024-01-15", "08:00")).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(store.remove(|_| true), 1);
        assert_eq!(snapshot.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn rejected_entries_leave_store_unchanged() {
        let mut store = LogStore::new();
        store.append(workout("2024-01-15", "08:00")).unwrap();
        let before = store.snapshot();

        let mut empty = workout("2024-01-15", "09:00");
        if let Activity::Workout(w) = &mut empty.activity {
            w.exercises.clear();
        }
        assert_eq!(store.append(empty), Err(StoreError::NoExercises));

        let mut unnamed = workout("2024-01-15", "09:00");
        if let Activity::Workout(w) = &mut unnamed.activity {
            w.exercises[0].name = "  ".into();
        }
        assert_eq!(
            store.append(unnamed),
            Err(StoreError::Invalid(ValidationError::EmptyName))
        );

        let mut blank = workout("2024-01-15", "09:00");
        if let Activity::Workout(w) = &mut blank.activity {
            w.exercises[0].sets.push(Set::default());
        }
        assert!(matches!(store.append(blank), Err(StoreError::BlankSet { .. })));

        let mut negative = workout("2024-01-15", "09:00");
        if let Activity::Workout(w) = &mut negative.activity {
            w.exercises[0].sets[0].weight = -5.0;
        }
        assert!(matches!(
            store.append(negative),
            Err(StoreError::Invalid(ValidationError::NotFinite { field: "weight", .. }))
        ));

        let bad_sleep = LogEntry::new(
            date("2024-01-15"),
            time("23:00"),
            Activity::Sleep(Sleep {
                duration: f64::NAN,
                quality: 3.0,
                notes: String::new(),
            }),
        );
        assert!(store.append(bad_sleep).is_err());

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut store = LogStore::new();
        let entry = workout("2024-01-15", "08:00");
        store.append(entry.clone()).unwrap();
        assert_eq!(
            store.append(entry.clone()),
            Err(StoreError::DuplicateId(entry.id))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_workout_at_matches_date_and_time_only() {
        let mut store = LogStore::new();
        let target = workout("2024-01-15", "08:00");
        let same_date = workout("2024-01-15", "18:00");
        let same_time = workout("2024-01-16", "08:00");
        let other_kind = mindset("2024-01-15", "08:00");
        for entry in [&target, &same_date, &same_time, &other_kind] {
            store.append(entry.clone()).unwrap();
        }

        assert_eq!(store.remove_workout_at(date("2024-01-15"), time("08:00")), 1);
        assert_eq!(store.snapshot(), vec![same_date, same_time, other_kind]);
    }

    #[test]
    fn remove_with_no_match_is_a_noop() {
        let mut store = LogStore::new();
        store.append(workout("2024-01-15", "08:00")).unwrap();
        assert_eq!(store.remove(|entry| !entry.is_workout()), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_by_id() {
        let mut store = LogStore::new();
        let a = workout("2024-01-15", "08:00");
        let b = workout("2024-01-15", "08:00");
        store.append(a.clone()).unwrap();
        store.append(b.clone()).unwrap();

        assert_eq!(store.remove_by_id(&a.id), Some(a.clone()));
        assert_eq!(store.remove_by_id(&a.id), None);
        assert_eq!(store.snapshot(), vec![b]);
    }

    #[test]
    fn replace_keeps_id_and_position() {
        let mut store = LogStore::new();
        let first = workout("2024-01-15", "08:00");
        let second = mindset("2024-01-15", "09:00");
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        let replacement = workout("2024-01-15", "10:30");
        store.replace(&first.id, replacement.clone()).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].id, first.id);
        assert_eq!(snapshot[0].time, replacement.time);
        assert_eq!(snapshot[1], second);
    }

    #[test]
    fn replace_missing_or_invalid_fails_without_change() {
        let mut store = LogStore::new();
        let entry = workout("2024-01-15", "08:00");
        store.append(entry.clone()).unwrap();

        let missing = LogId::new("nope").unwrap();
        assert_eq!(
            store.replace(&missing, workout("2024-01-15", "09:00")),
            Err(StoreError::NotFound(missing))
        );

        let mut invalid = workout("2024-01-15", "09:00");
        if let Activity::Workout(w) = &mut invalid.activity {
            w.exercises.clear();
        }
        assert_eq!(store.replace(&entry.id, invalid), Err(StoreError::NoExercises));
        assert_eq!(store.snapshot(), vec![entry]);
    }

    #[test]
    fn find_by_unique_prefix() {
        let a = LogEntry {
            id: LogId::new("abc111").unwrap(),
            ..workout("2024-01-15", "08:00")
        };
        let b = LogEntry {
            id: LogId::new("abd222").unwrap(),
            ..workout("2024-01-15", "09:00")
        };
        let store = LogStore::from_entries([a.clone(), b]).unwrap();

        assert_eq!(store.find("abc").map(|e| &e.id), Ok(&a.id));
        assert_eq!(store.find("abc111").map(|e| &e.id), Ok(&a.id));
        assert_eq!(
            store.find("ab").unwrap_err(),
            StoreError::AmbiguousPrefix {
                prefix: "ab".to_string(),
                matches: 2
            }
        );
        assert_eq!(
            store.find("zzz").unwrap_err(),
            StoreError::NoMatch {
                prefix: "zzz".to_string()
            }
        );
    }
}
