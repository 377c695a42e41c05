//! Month calendar bucketing.

use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::entry::LogEntry;
use crate::views::has_workout_on;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MonthError {
    #[error("month must be YYYY-MM, got {0:?}")]
    Format(String),
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, MonthError> {
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map(Self::of)
            .map_err(|_| MonthError::Format(s.to_string()))
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day())
    }

    /// Every date of the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first;
        (0..self.days_in_month()).filter_map(move |offset| {
            first.checked_add_days(chrono::Days::new(u64::from(offset)))
        })
    }

    /// Title line such as "January 2024".
    pub fn title(self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl FromStr for YearMonth {
    type Err = MonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One day cell of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub has_workout: bool,
}

/// Workout presence for every day of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

pub fn month_grid(entries: &[LogEntry], month: YearMonth) -> MonthGrid {
    let days = month
        .days()
        .map(|date| CalendarDay {
            date,
            day: date.day(),
            has_workout: has_workout_on(entries, date),
        })
        .collect();

    MonthGrid {
        year: month.year(),
        month: month.month(),
        days,
    }
}

/// Heading for a selected day: "Today", "Yesterday", or e.g.
/// "Monday, January 15".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%A, %B %-d").to_string()
    }
}
