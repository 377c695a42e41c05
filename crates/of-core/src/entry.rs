//! Log entries: one timestamped record of a workout, mindset check-in, sleep
//! or nutrition log.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{LogId, LogTime};

/// One set of an exercise.
///
/// Missing or `null` `reps` and `weight` fields deserialize as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Set {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reps: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    /// Rate of perceived exertion, typically 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Set {
    pub const fn new(reps: u32, weight: f64) -> Self {
        Self {
            reps,
            weight,
            rpe: None,
        }
    }

    #[must_use]
    pub const fn with_rpe(mut self, rpe: f64) -> Self {
        self.rpe = Some(rpe);
        self
    }

    /// True for the placeholder row with neither reps nor weight.
    pub fn is_blank(&self) -> bool {
        self.reps == 0 && self.weight == 0.0
    }

    /// Reps times weight.
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

/// A named exercise and its sets, in the order performed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(alias = "exercise")]
    pub name: String,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: Vec<Set>) -> Self {
        Self {
            name: name.into(),
            sets,
        }
    }

    pub fn volume(&self) -> f64 {
        self.sets.iter().map(Set::volume).sum()
    }
}

/// A strength-training session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Workout {
    /// Total reps times weight over every set of every exercise.
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::volume).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mindset {
    pub mood: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sleep {
    /// Hours slept.
    pub duration: f64,
    pub quality: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// What was logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activity {
    Workout(Workout),
    Mindset(Mindset),
    Sleep(Sleep),
    Nutrition(Nutrition),
}

impl Activity {
    pub const fn kind(&self) -> LogKind {
        match self {
            Self::Workout(_) => LogKind::Workout,
            Self::Mindset(_) => LogKind::Mindset,
            Self::Sleep(_) => LogKind::Sleep,
            Self::Nutrition(_) => LogKind::Nutrition,
        }
    }
}

/// Discriminator of [`Activity`], as written in the `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Workout,
    Mindset,
    Sleep,
    Nutrition,
}

impl LogKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Mindset => "mindset",
            Self::Sleep => "sleep",
            Self::Nutrition => "nutrition",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogKind {
    type Err = UnknownLogKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workout" => Ok(Self::Workout),
            "mindset" => Ok(Self::Mindset),
            "sleep" => Ok(Self::Sleep),
            "nutrition" => Ok(Self::Nutrition),
            _ => Err(UnknownLogKind(s.to_string())),
        }
    }
}

/// Error type for unknown log kind strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogKind(pub String);

impl fmt::Display for UnknownLogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log kind: {}", self.0)
    }
}

impl std::error::Error for UnknownLogKind {}

/// A single log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogId,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub time: LogTime,
    #[serde(flatten)]
    pub activity: Activity,
}

impl LogEntry {
    /// Creates an entry with a freshly generated ID.
    pub fn new(date: NaiveDate, time: LogTime, activity: Activity) -> Self {
        Self {
            id: LogId::generate(),
            date,
            time,
            activity,
        }
    }

    pub fn workout(date: NaiveDate, time: LogTime, workout: Workout) -> Self {
        Self::new(date, time, Activity::Workout(workout))
    }

    pub const fn kind(&self) -> LogKind {
        self.activity.kind()
    }

    pub const fn as_workout(&self) -> Option<&Workout> {
        match &self.activity {
            Activity::Workout(workout) => Some(workout),
            _ => None,
        }
    }

    pub const fn is_workout(&self) -> bool {
        matches!(self.activity, Activity::Workout(_))
    }
}
