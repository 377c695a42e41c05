//! Core domain logic for the OmniaFortis training log.
//!
//! This crate contains the fundamental types and logic for:
//! - Log entries: workouts, mindset check-ins, sleep and nutrition logs
//! - Validation: deciding whether typed input may enter a draft or the store
//! - Derived views: totals, per-day workouts, the month calendar
//! - Drafts: the exercise and workout being composed before saving

pub mod calendar;
pub mod draft;
pub mod entry;
pub mod session;
pub mod types;
pub mod validate;
pub mod views;

pub use calendar::{CalendarDay, MonthError, MonthGrid, YearMonth, day_label, month_grid};
pub use draft::{DraftState, ExerciseDraft, SetField};
pub use entry::{Activity, Exercise, LogEntry, LogKind, Mindset, Nutrition, Set, Sleep, Workout};
pub use session::{DraftError, WorkoutDraft};
pub use types::{LogId, LogTime, ValidationError};
pub use views::{HomeStats, home_stats};
