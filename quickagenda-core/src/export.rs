//! Calendar export references for published events.
//!
//! Only the first session (in working-set order, not earliest start) is
//! exported to Google Calendar. Multi-session events therefore show up as
//! one entry there; the `.ics` download carries every session.

use chrono::NaiveDateTime;
use url::Url;

use crate::event::{PublishedEvent, ShareCode};
use crate::ics::session_span;
use crate::share::share_url;

const GOOGLE_CALENDAR_RENDER: &str = "https://www.google.com/calendar/render";

/// Google Calendar "add event" link for the first session.
///
/// Start and end are local-naive `YYYYMMDDTHHMMSS` tokens with no zone
/// suffix, so Google reads them in the viewer's own zone. Minutes are kept
/// rather than rounded down to the hour, so a half-hour session does not
/// export as a zero-length entry. Returns `None` when there is no session
/// to export.
pub fn google_calendar_link(event: &PublishedEvent, origin: &str) -> Option<String> {
    let first = event.first_session()?;
    let (start, end) = session_span(event.event_date, first);
    let dates = format!("{}/{}", naive_token(start), naive_token(end));

    let text = if event.name.trim().is_empty() {
        "Event"
    } else {
        event.name.as_str()
    };
    let details = share_url(origin, event.share_code.as_str()).ok()?;

    let url = Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER,
        &[
            ("action", "TEMPLATE"),
            ("text", text),
            ("dates", dates.as_str()),
            ("details", details.as_str()),
        ],
    )
    .ok()?;

    Some(url.into())
}

/// Where the server serves the event's `.ics` file.
pub fn ics_download_reference(api_base: &str, code: &ShareCode) -> String {
    format!("{}/api/events/{}.ics", api_base.trim_end_matches('/'), code)
}

fn naive_token(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionId};
    use chrono::NaiveDate;

    fn session(id: &str, start: &str, end: &str) -> Session {
        Session::with_times(
            SessionId::Persisted(id.into()),
            "Cake",
            "",
            start.parse().unwrap(),
            end.parse().unwrap(),
        )
        .unwrap()
    }

    fn event(sessions: Vec<Session>) -> PublishedEvent {
        PublishedEvent {
            name: "BBQ".into(),
            event_date: NaiveDate::from_ymd_opt(2025, 10, 29).unwrap(),
            share_code: ShareCode::new("AB12"),
            sessions,
        }
    }

    #[test]
    fn google_link_for_single_session() {
        let link = google_calendar_link(&event(vec![session("1", "09:00", "10:00")]), "https://x.test")
            .unwrap();

        assert_eq!(
            link,
            "https://www.google.com/calendar/render?action=TEMPLATE&text=BBQ\
             &dates=20251029T090000%2F20251029T100000\
             &details=https%3A%2F%2Fx.test%2Fs%2FAB12"
        );
    }

    #[test]
    fn google_link_uses_first_session_not_earliest() {
        let ev = event(vec![session("1", "14:00", "15:30"), session("2", "09:00", "10:00")]);
        let link = google_calendar_link(&ev, "https://x.test").unwrap();
        assert!(link.contains("dates=20251029T140000%2F20251029T153000"), "{link}");
    }

    #[test]
    fn google_link_has_no_zone_suffix() {
        let link = google_calendar_link(&event(vec![session("1", "09:00", "10:00")]), "https://x.test")
            .unwrap();
        assert!(!link.contains("Z%2F"));
        assert!(!link.contains("00Z&"));
    }

    #[test]
    fn google_link_needs_a_session() {
        assert_eq!(google_calendar_link(&event(vec![]), "https://x.test"), None);
    }

    #[test]
    fn google_link_falls_back_to_generic_title() {
        let mut ev = event(vec![session("1", "09:00", "10:00")]);
        ev.name = String::new();
        let link = google_calendar_link(&ev, "https://x.test").unwrap();
        assert!(link.contains("text=Event&"), "{link}");
    }

    #[test]
    fn ics_reference_is_keyed_by_code() {
        assert_eq!(
            ics_download_reference("https://api.x.test/", &ShareCode::new("AB12")),
            "https://api.x.test/api/events/AB12.ics"
        );
    }
}
