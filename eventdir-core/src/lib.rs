//! Validation of recurring, year-agnostic event calendars.
//!
//! This crate provides the date logic behind an event directory:
//! - `CalendarDay` and `CalendarInterval` for month-day ranges that may wrap past year-end
//! - `Event` and `EventRecord` for validated event definitions
//! - `collision` for the cross-event checks (exactly one fallback, no overlapping days)
//!
//! Loading event directories and parsing their metadata is left to the caller,
//! which hands already-built `Event` values to [`check_date_configuration`].

pub mod calendar_day;
pub mod collision;
pub mod config;
pub mod error;
pub mod event;
pub mod interval;

pub use calendar_day::{CalendarDay, DAYS_IN_YEAR, REFERENCE_YEAR};
pub use collision::{
    Collisions, active_event, check_date_configuration, check_date_configuration_with,
    check_fallback_cardinality, find_collisions,
};
pub use config::ValidationConfig;
pub use error::{EventDirError, EventDirResult};
pub use event::{Event, EventRecord, Schedule};
pub use interval::{ActiveDays, CalendarInterval};
