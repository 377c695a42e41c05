//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for user input and stored entries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The exercise name was empty after trimming.
    #[error("please enter an exercise name")]
    EmptyName,

    /// No set had reps or weight greater than zero.
    #[error("please enter at least one set with reps or weight greater than 0")]
    NoValidSets,

    /// The training title was empty after trimming.
    #[error("please enter a training title")]
    EmptyTitle,

    /// A required identifier was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A time string was not zero-padded 24-hour `HH:MM`.
    #[error("time must be zero-padded 24-hour HH:MM, got {value:?}")]
    InvalidTime { value: String },

    /// A numeric field was negative, NaN or infinite.
    #[error("{field} must be a finite non-negative number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

/// Unique identifier of a log entry.
///
/// Generated once when the entry is created and kept across edits, so two
/// workouts logged in the same minute never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogId(String);

impl LogId {
    /// Creates an ID from an existing value after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "log ID" });
        }
        Ok(Self(id))
    }

    /// Generates a fresh random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First six characters, used for display.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(6)
            .map_or(self.0.len(), |(idx, _)| idx);
        &self.0[..end]
    }
}

impl TryFrom<String> for LogId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogId> for String {
    fn from(id: LogId) -> Self {
        id.0
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Local wall-clock time of a log entry, at minute precision.
///
/// Always rendered as zero-padded 24-hour `HH:MM`, so the string form sorts
/// the same way as the time itself. Only meaningful within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogTime(NaiveTime);

impl LogTime {
    /// Truncates a clock reading to the minute.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }

    /// Returns the underlying clock time.
    pub const fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for LogTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: s.to_string(),
        };
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(idx, b)| idx == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for LogTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl TryFrom<String> for LogTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for LogTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LogTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
