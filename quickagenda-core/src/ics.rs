//! ICS file generation for published events.

use chrono::{NaiveDate, NaiveDateTime};
use icalendar::{Calendar, Component, EventLike};

use crate::event::PublishedEvent;
use crate::session::Session;
use crate::time::Clock;

const PRODID: &str = "PRODID:QUICKAGENDA";

/// Generate .ics content for a published event, one VEVENT per session.
///
/// Times are floating (no `Z`, no `TZID`), matching how the event was
/// scheduled: as wall-clock times on the event day.
pub fn generate_ics(event: &PublishedEvent) -> String {
    let mut cal = Calendar::new();
    cal.name(&event.name);

    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for session in &event.sessions {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}-{}@quickagenda", event.share_code, session.id));
        ics_event.summary(&session.title);
        ics_event.add_property("DTSTAMP", &dtstamp);

        let (start, end) = session_span(event.event_date, session);
        ics_event.add_property("DTSTART", start.format("%Y%m%dT%H%M%S").to_string());
        ics_event.add_property("DTEND", end.format("%Y%m%dT%H%M%S").to_string());

        ics_event.description(&event.name);
        if !session.location.is_empty() {
            ics_event.location(&session.location);
        }

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

/// Start and end of a session as naive datetimes on the event day.
/// An end of `24:00` lands on midnight of the following day.
pub(crate) fn session_span(date: NaiveDate, session: &Session) -> (NaiveDateTime, NaiveDateTime) {
    (at(date, session.start_time()), at(date, session.end_time()))
}

fn at(date: NaiveDate, clock: Clock) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
        + chrono::Duration::minutes(i64::from(clock.minutes_since_midnight()))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ShareCode;
    use crate::session::SessionId;

    fn session(id: &str, title: &str, start: &str, end: &str, location: &str) -> Session {
        Session::with_times(
            SessionId::Persisted(id.into()),
            title,
            location,
            start.parse().unwrap(),
            end.parse().unwrap(),
        )
        .unwrap()
    }

    fn make_test_event() -> PublishedEvent {
        PublishedEvent {
            name: "BBQ".into(),
            event_date: NaiveDate::from_ymd_opt(2025, 10, 29).unwrap(),
            share_code: ShareCode::new("AB12"),
            sessions: vec![
                session("1", "Cake", "09:00", "10:00", ""),
                session("2", "Grill", "22:30", "24:00", "Garden"),
            ],
        }
    }

    #[test]
    fn test_generate_ics_one_vevent_per_session() {
        let ics = generate_ics(&make_test_event());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2, "ICS:\n{}", ics);
        assert!(ics.contains("UID:AB12-1@quickagenda"), "ICS:\n{}", ics);
        assert!(ics.contains("UID:AB12-2@quickagenda"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Cake"));
        assert!(ics.contains("SUMMARY:Grill"));
    }

    #[test]
    fn test_generate_ics_uses_floating_times() {
        let ics = generate_ics(&make_test_event());

        assert!(ics.contains("DTSTART:20251029T090000"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20251029T100000"), "ICS:\n{}", ics);
        // 24:00 rolls to the next day
        assert!(ics.contains("DTEND:20251030T000000"), "ICS:\n{}", ics);
        assert!(!ics.contains("DTSTART:20251029T090000Z"));
    }

    #[test]
    fn test_generate_ics_location_only_when_set() {
        let ics = generate_ics(&make_test_event());
        let location_count = ics.lines().filter(|l| l.starts_with("LOCATION")).count();
        assert_eq!(location_count, 1, "ICS:\n{}", ics);
        assert!(ics.contains("LOCATION:Garden"));
    }

    #[test]
    fn test_generate_ics_strips_bloat() {
        let ics = generate_ics(&make_test_event());
        assert!(ics.contains(PRODID));
        assert!(!ics.contains("CALSCALE:GREGORIAN"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }
}
