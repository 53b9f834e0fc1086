//! Recurring month-day ranges and the days they cover.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::calendar_day::{CalendarDay, DAYS_IN_YEAR};

/// An inclusive, recurring range `[start, end]` of calendar days.
///
/// When `start` comes after `end` in calendar order, the range wraps past
/// year-end (e.g. Dec 20 through Jan 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarInterval {
    start: CalendarDay,
    end: CalendarDay,
}

impl CalendarInterval {
    pub fn new(start: CalendarDay, end: CalendarDay) -> Self {
        CalendarInterval { start, end }
    }

    pub fn start(&self) -> CalendarDay {
        self.start
    }

    pub fn end(&self) -> CalendarDay {
        self.end
    }

    /// Whether the range crosses from Dec 31 into Jan 1.
    pub fn is_wrapping(&self) -> bool {
        self.start > self.end
    }

    /// Number of days covered, counting both endpoints (1..=366).
    pub fn len(&self) -> usize {
        let span = (self.end.ordinal0() + DAYS_IN_YEAR - self.start.ordinal0()) % DAYS_IN_YEAR;
        span + 1
    }

    /// Always false; an interval covers at least its start day.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `day` falls inside the range.
    pub fn contains(&self, day: CalendarDay) -> bool {
        if self.is_wrapping() {
            day >= self.start || day <= self.end
        } else {
            day >= self.start && day <= self.end
        }
    }

    /// Every day the range covers, starting at `start`.
    ///
    /// Each call returns a fresh iterator.
    pub fn days(&self) -> ActiveDays {
        ActiveDays {
            next: Some(self.start),
            end: self.end,
            remaining: self.len(),
        }
    }
}

impl IntoIterator for &CalendarInterval {
    type Item = CalendarDay;
    type IntoIter = ActiveDays;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

/// Iterator over the days of a [`CalendarInterval`].
#[derive(Debug, Clone)]
pub struct ActiveDays {
    next: Option<CalendarDay>,
    end: CalendarDay,
    remaining: usize,
}

impl Iterator for ActiveDays {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = (current != self.end).then(|| current.succ());
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ActiveDays {}

impl FusedIterator for ActiveDays {}
