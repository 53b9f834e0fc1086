//! Cross-event checks: fallback cardinality and date collisions.

use std::fmt::Write as _;

use tracing::{debug, warn};

use crate::calendar_day::{CalendarDay, DAYS_IN_YEAR};
use crate::config::ValidationConfig;
use crate::error::{EventDirError, EventDirResult};
use crate::event::Event;

/// Days claimed by more than one event, in calendar order.
///
/// Claimants of each day are listed in the order the events were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collisions<'a> {
    days: Vec<(CalendarDay, Vec<&'a Event>)>,
}

impl<'a> Collisions<'a> {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of colliding days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Events contending for `day`, if it is a collision.
    pub fn get(&self, day: CalendarDay) -> Option<&[&'a Event]> {
        self.days
            .binary_search_by_key(&day, |(colliding, _)| *colliding)
            .ok()
            .map(|index| self.days[index].1.as_slice())
    }

    pub fn days(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        self.days.iter().map(|(day, _)| *day)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CalendarDay, &[&'a Event])> + '_ {
        self.days.iter().map(|(day, events)| (*day, events.as_slice()))
    }

    /// One `"<day>: A, B"` line per colliding day, days rendered with `date_format`.
    ///
    /// Returns [`EventDirError::Config`] if `date_format` is not a valid chrono format.
    pub fn report_lines(&self, date_format: &str) -> EventDirResult<Vec<String>> {
        self.iter()
            .map(|(day, events)| -> EventDirResult<String> {
                let mut line = String::new();
                write!(line, "{}", day.format(date_format)).map_err(|_| {
                    EventDirError::Config(format!(
                        "report_date_format '{date_format}' is not a valid date format"
                    ))
                })?;
                line.push_str(": ");
                line.push_str(&join_names(events.iter().copied()));
                Ok(line)
            })
            .collect()
    }
}

fn join_names<'e>(events: impl Iterator<Item = &'e Event>) -> String {
    events.map(Event::name).collect::<Vec<_>>().join(", ")
}

/// Ensure exactly one event is the fallback and return it.
///
/// On failure every fallback-flagged name is listed.
pub fn check_fallback_cardinality(events: &[Event]) -> EventDirResult<&Event> {
    let fallbacks: Vec<&Event> = events.iter().filter(|event| event.is_fallback()).collect();

    match fallbacks.as_slice() {
        [] => Err(EventDirError::Misconfiguration(
            "There is no fallback event".into(),
        )),
        [fallback] => Ok(*fallback),
        many => Err(EventDirError::Misconfiguration(format!(
            "There are multiple fallback events: {} (must be exactly 1)",
            join_names(many.iter().copied())
        ))),
    }
}

/// Map every day claimed by two or more of `events` to its claimants.
///
/// `events` must not contain the fallback event; passing it is a usage error
/// ([`EventDirError::Undated`]).
pub fn find_collisions<'a, I>(events: I) -> EventDirResult<Collisions<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    // Indexed by day of year, so a scan of the table is already in calendar order.
    let mut schedule: Vec<Vec<&'a Event>> = vec![Vec::new(); DAYS_IN_YEAR];

    for event in events {
        for day in event.active_days()? {
            schedule[day.ordinal0()].push(event);
        }
    }

    let days = CalendarDay::all()
        .zip(schedule)
        .filter(|(_, claimants)| claimants.len() > 1)
        .collect();

    Ok(Collisions { days })
}

/// Check that there is exactly one fallback event and that no two dated
/// events are active on the same day.
///
/// Collisions are reported all at once, one line per day.
pub fn check_date_configuration(events: &[Event]) -> EventDirResult<()> {
    check_date_configuration_with(events, &ValidationConfig::default())
}

/// [`check_date_configuration`] with report rendering taken from `config`.
#[tracing::instrument(skip_all, fields(n_events = events.len()))]
pub fn check_date_configuration_with(
    events: &[Event],
    config: &ValidationConfig,
) -> EventDirResult<()> {
    config.validate()?;

    let fallback = check_fallback_cardinality(events)?;
    debug!(fallback = fallback.name(), "fallback event accepted");

    let collisions = find_collisions(events.iter().filter(|event| !event.is_fallback()))?;

    if collisions.is_empty() {
        debug!("no date collisions");
        return Ok(());
    }

    for (day, claimants) in collisions.iter() {
        warn!(
            day = %day,
            events = %join_names(claimants.iter().copied()),
            "date collision"
        );
    }
    debug!(colliding_days = collisions.len(), "date collisions found");

    let report = collisions.report_lines(&config.report_date_format)?.join("\n");
    Err(EventDirError::Misconfiguration(format!(
        "Event collision detected:\n{report}"
    )))
}

/// The event active on `day`: the first dated event covering it, otherwise
/// the fallback event.
pub fn active_event(events: &[Event], day: CalendarDay) -> Option<&Event> {
    events
        .iter()
        .find(|event| event.is_active_on(day))
        .or_else(|| events.iter().find(|event| event.is_fallback()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(month: u32, day: u32) -> CalendarDay {
        CalendarDay::new(month, day).unwrap()
    }

    fn dated(name: &str, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::new(
            name,
            None,
            Some(day(start.0, start.1)),
            Some(day(end.0, end.1)),
            "Test event",
        )
        .unwrap()
    }

    fn fallback(name: &str) -> Event {
        Event::new(name, Some(true), None, None, "Test fallback").unwrap()
    }

    #[test]
    fn test_cardinality_none() {
        let events = vec![dated("a", (1, 1), (1, 5))];
        assert_eq!(
            check_fallback_cardinality(&events).unwrap_err(),
            EventDirError::Misconfiguration("There is no fallback event".into())
        );
    }

    #[test]
    fn test_cardinality_many_lists_names_in_order() {
        let events = vec![fallback("X"), dated("a", (1, 1), (1, 5)), fallback("Y")];
        assert_eq!(
            check_fallback_cardinality(&events).unwrap_err(),
            EventDirError::Misconfiguration(
                "There are multiple fallback events: X, Y (must be exactly 1)".into()
            )
        );
    }

    #[test]
    fn test_cardinality_exactly_one() {
        let events = vec![dated("a", (1, 1), (1, 5)), fallback("default")];
        assert_eq!(check_fallback_cardinality(&events).unwrap().name(), "default");
    }

    #[test]
    fn test_disjoint_events_do_not_collide() {
        let events = vec![dated("A", (1, 1), (1, 5)), dated("B", (1, 10), (1, 15))];
        assert!(find_collisions(&events).unwrap().is_empty());
    }

    #[test]
    fn test_overlap_maps_each_shared_day() {
        let events = vec![dated("A", (1, 1), (1, 10)), dated("B", (1, 5), (1, 20))];
        let collisions = find_collisions(&events).unwrap();

        let days: Vec<_> = collisions.days().collect();
        let expected: Vec<_> = (5..=10).map(|d| day(1, d)).collect();
        assert_eq!(days, expected);

        for (_, claimants) in collisions.iter() {
            let names: Vec<_> = claimants.iter().map(|e| e.name()).collect();
            assert_eq!(names, vec!["A", "B"]);
        }
    }

    #[test]
    fn test_claimants_follow_input_order() {
        let events = vec![dated("B", (1, 5), (1, 20)), dated("A", (1, 1), (1, 10))];
        let collisions = find_collisions(&events).unwrap();
        let names: Vec<_> = collisions
            .get(day(1, 7))
            .unwrap()
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_three_way_collision_lists_all() {
        let events = vec![
            dated("A", (3, 1), (3, 3)),
            dated("B", (3, 3), (3, 4)),
            dated("C", (2, 28), (3, 3)),
        ];
        let collisions = find_collisions(&events).unwrap();
        let names: Vec<_> = collisions
            .get(day(3, 3))
            .unwrap()
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(collisions.get(day(3, 1)).map(<[_]>::len), Some(2));
        assert!(collisions.get(day(3, 4)).is_none());
    }

    #[test]
    fn test_wrapping_ranges_collide_across_year_end() {
        let events = vec![dated("winter", (12, 20), (1, 5)), dated("new-year", (1, 1), (1, 2))];
        let collisions = find_collisions(&events).unwrap();
        let days: Vec<_> = collisions.days().collect();
        assert_eq!(days, vec![day(1, 1), day(1, 2)]);
    }

    #[test]
    fn test_find_collisions_rejects_fallback() {
        let events = vec![fallback("default")];
        assert_eq!(
            find_collisions(&events).unwrap_err(),
            EventDirError::Undated("default".into())
        );
    }

    #[test]
    fn test_check_passes_without_overlap() {
        let events = vec![
            fallback("default"),
            dated("A", (1, 1), (1, 5)),
            dated("B", (1, 10), (1, 15)),
        ];
        assert_eq!(check_date_configuration(&events), Ok(()));
    }

    #[test]
    fn test_check_reports_each_colliding_day_sorted() {
        let events = vec![
            fallback("default"),
            dated("late", (12, 30), (1, 1)),
            dated("early", (1, 1), (1, 2)),
            dated("end", (12, 31), (12, 31)),
        ];
        let err = check_date_configuration(&events).unwrap_err();
        assert_eq!(
            err,
            EventDirError::Misconfiguration(
                "Event collision detected:\nJanuary 01: late, early\nDecember 31: late, end".into()
            )
        );
    }

    #[test]
    fn test_check_stops_at_cardinality_failure() {
        let events = vec![dated("A", (1, 1), (1, 10)), dated("B", (1, 5), (1, 20))];
        assert_eq!(
            check_date_configuration(&events).unwrap_err(),
            EventDirError::Misconfiguration("There is no fallback event".into())
        );
    }

    #[test]
    fn test_check_uses_configured_date_format() {
        let config = ValidationConfig {
            report_date_format: "%m-%d".into(),
            ..ValidationConfig::default()
        };
        let events = vec![
            fallback("default"),
            dated("A", (2, 28), (2, 29)),
            dated("B", (2, 29), (3, 1)),
        ];
        let err = check_date_configuration_with(&events, &config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Event collision detected:\n02-29: A, B"
        );
    }

    #[test]
    fn test_report_lines_rejects_bad_format() {
        let events = vec![dated("A", (1, 1), (1, 2)), dated("B", (1, 1), (1, 2))];
        let collisions = find_collisions(&events).unwrap();

        let err = collisions.report_lines("%Q").unwrap_err();
        assert!(matches!(err, EventDirError::Config(_)));

        assert_eq!(
            collisions.report_lines("%b %d").unwrap(),
            vec!["Jan 01: A, B", "Jan 02: A, B"]
        );
    }

    #[test]
    fn test_get_finds_only_colliding_days() {
        let events = vec![dated("A", (12, 30), (1, 3)), dated("B", (1, 2), (2, 1))];
        let collisions = find_collisions(&events).unwrap();
        assert_eq!(collisions.len(), 2);
        for d in CalendarDay::all() {
            let expected = d == day(1, 2) || d == day(1, 3);
            assert_eq!(collisions.get(d).is_some(), expected, "{d}");
        }
    }

    #[test]
    fn test_active_event_prefers_dated_then_fallback() {
        let events = vec![fallback("default"), dated("halloween", (10, 1), (10, 31))];
        assert_eq!(active_event(&events, day(10, 15)).unwrap().name(), "halloween");
        assert_eq!(active_event(&events, day(11, 1)).unwrap().name(), "default");
        assert!(active_event(&[], day(1, 1)).is_none());
    }
}
