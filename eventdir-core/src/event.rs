//! Validated event records.
//!
//! An [`Event`] is either the fallback event, which has no dates and covers
//! whatever no other event covers, or a dated event active on a recurring
//! [`CalendarInterval`]. Events are only built through validation, so every
//! `Event` in circulation satisfies the data-model invariants.

use serde::{Deserialize, Serialize};

use crate::calendar_day::CalendarDay;
use crate::config::ValidationConfig;
use crate::error::{EventDirError, EventDirResult};
use crate::interval::{ActiveDays, CalendarInterval};

/// When an event is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schedule {
    /// Active whenever no dated event is.
    Fallback,
    /// Active on every day of the interval.
    Dated(CalendarInterval),
}

/// A correctly configured event. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    name: String,
    schedule: Schedule,
    description: String,
}

/// Unvalidated event input, as supplied by a loader.
///
/// A missing `fallback` means the event is not the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<CalendarDay>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<CalendarDay>,

    pub description: String,
}

impl EventRecord {
    /// Check the record against `config` and build an [`Event`].
    ///
    /// Fails with [`EventDirError::Misconfiguration`] on an empty or overlong
    /// description, a fallback event with dates, or a dated event missing one.
    pub fn validate(self, config: &ValidationConfig) -> EventDirResult<Event> {
        if self.description.is_empty() {
            return Err(EventDirError::Misconfiguration("No description".into()));
        }

        let length = self.description.chars().count();
        if length > config.max_description_chars {
            return Err(EventDirError::Misconfiguration(format!(
                "Description too long ({} characters), must be <= {}",
                length, config.max_description_chars
            )));
        }

        let schedule = if self.fallback.unwrap_or(false) {
            let present: Vec<&str> = [
                ("start_date", self.start_date.is_some()),
                ("end_date", self.end_date.is_some()),
            ]
            .into_iter()
            .filter_map(|(attr, set)| set.then_some(attr))
            .collect();

            if !present.is_empty() {
                return Err(EventDirError::Misconfiguration(format!(
                    "Fallback event must not have attributes: {}",
                    present.join(", ")
                )));
            }

            Schedule::Fallback
        } else {
            match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => Schedule::Dated(CalendarInterval::new(start, end)),
                (start, end) => {
                    let missing: Vec<&str> = [("start_date", start), ("end_date", end)]
                        .into_iter()
                        .filter_map(|(attr, value)| value.is_none().then_some(attr))
                        .collect();

                    return Err(EventDirError::Misconfiguration(format!(
                        "Non-fallback event must have attributes: {}",
                        missing.join(", ")
                    )));
                }
            }
        };

        Ok(Event {
            name: self.name,
            schedule,
            description: self.description,
        })
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = EventDirError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        record.validate(&ValidationConfig::default())
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        let (fallback, start_date, end_date) = match event.schedule {
            Schedule::Fallback => (Some(true), None, None),
            Schedule::Dated(interval) => (None, Some(interval.start()), Some(interval.end())),
        };

        EventRecord {
            name: event.name,
            fallback,
            start_date,
            end_date,
            description: event.description,
        }
    }
}

impl Event {
    /// Build an event with the default validation settings.
    pub fn new(
        name: impl Into<String>,
        fallback: Option<bool>,
        start_date: Option<CalendarDay>,
        end_date: Option<CalendarDay>,
        description: impl Into<String>,
    ) -> EventDirResult<Self> {
        EventRecord {
            name: name.into(),
            fallback,
            start_date,
            end_date,
            description: description.into(),
        }
        .try_into()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.schedule, Schedule::Fallback)
    }

    /// The active interval, or `None` for the fallback event.
    pub fn interval(&self) -> Option<CalendarInterval> {
        match self.schedule {
            Schedule::Fallback => None,
            Schedule::Dated(interval) => Some(interval),
        }
    }

    pub fn start_date(&self) -> Option<CalendarDay> {
        self.interval().map(|interval| interval.start())
    }

    pub fn end_date(&self) -> Option<CalendarDay> {
        self.interval().map(|interval| interval.end())
    }

    /// Every day on which the event is active.
    ///
    /// Returns [`EventDirError::Undated`] for the fallback event, which has
    /// no days of its own.
    pub fn active_days(&self) -> EventDirResult<ActiveDays> {
        self.interval()
            .map(|interval| interval.days())
            .ok_or_else(|| EventDirError::Undated(self.name.clone()))
    }

    /// Whether the event's own range covers `day`. Always false for the fallback.
    pub fn is_active_on(&self, day: CalendarDay) -> bool {
        self.interval().is_some_and(|interval| interval.contains(day))
    }
}
