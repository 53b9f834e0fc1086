//! Month-day values on the fixed reference year.
//!
//! Recurring events only care about month and day. Every `CalendarDay` is
//! pinned to [`REFERENCE_YEAR`], a leap year so that Feb 29 is representable,
//! and day arithmetic folds Dec 31 + 1 back onto Jan 1 of that same year.

use std::fmt;

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EventDirError, EventDirResult};

/// Arbitrary leap year that every calendar day is normalized to.
pub const REFERENCE_YEAR: i32 = 2020;

/// Number of days in the reference year.
pub const DAYS_IN_YEAR: usize = 366;

/// Default rendering used in collision reports, e.g. "January 05".
pub const DEFAULT_DAY_FORMAT: &str = "%B %d";

const YEAR_START: NaiveDate = match NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1) {
    Some(date) => date,
    None => panic!("reference year has no Jan 1"),
};

const YEAR_END: NaiveDate = match NaiveDate::from_ymd_opt(REFERENCE_YEAR, 12, 31) {
    Some(date) => date,
    None => panic!("reference year has no Dec 31"),
};

/// A day of the recurring calendar (month and day, year-agnostic).
///
/// Ordering is calendar order: month first, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthDay", into = "MonthDay")]
pub struct CalendarDay(NaiveDate);

/// Wire shape of a [`CalendarDay`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MonthDay {
    month: u32,
    day: u32,
}

impl CalendarDay {
    /// January 1.
    pub const FIRST: CalendarDay = CalendarDay(YEAR_START);

    /// December 31.
    pub const LAST: CalendarDay = CalendarDay(YEAR_END);

    /// Build a day from a month (1..=12) and day of month.
    ///
    /// Feb 29 is valid because the reference year is a leap year.
    pub fn new(month: u32, day: u32) -> EventDirResult<Self> {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
            .map(CalendarDay)
            .ok_or(EventDirError::InvalidDate { month, day })
    }

    /// Normalize any date to the reference year, dropping its year.
    pub fn from_date(date: NaiveDate) -> EventDirResult<Self> {
        Self::new(date.month(), date.day())
    }

    /// The underlying date, always in [`REFERENCE_YEAR`].
    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// 0-based position in the reference year (0..=365).
    pub fn ordinal0(self) -> usize {
        self.0.ordinal0() as usize
    }

    /// The following calendar day. Dec 31 wraps to Jan 1.
    pub fn succ(self) -> Self {
        // Stepping past Dec 31 would land in the next year; fold it back.
        if self == Self::LAST {
            return Self::FIRST;
        }
        CalendarDay(self.0 + Days::new(1))
    }

    /// Render with a chrono format string (see [`DEFAULT_DAY_FORMAT`]).
    pub fn format<'a>(&self, fmt: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.0.format(fmt)
    }

    /// Every day of the reference year in calendar order.
    pub fn all() -> impl Iterator<Item = CalendarDay> {
        std::iter::successors(Some(Self::FIRST), |day| {
            (*day != Self::LAST).then(|| day.succ())
        })
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEFAULT_DAY_FORMAT))
    }
}

impl TryFrom<MonthDay> for CalendarDay {
    type Error = EventDirError;

    fn try_from(value: MonthDay) -> Result<Self, Self::Error> {
        CalendarDay::new(value.month, value.day)
    }
}

impl From<CalendarDay> for MonthDay {
    fn from(value: CalendarDay) -> Self {
        MonthDay {
            month: value.month(),
            day: value.day(),
        }
    }
}

impl From<CalendarDay> for NaiveDate {
    fn from(value: CalendarDay) -> Self {
        value.0
    }
}
