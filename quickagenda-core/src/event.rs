//! Event-level types: organizer input and published events.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult, ValidationFailure};
use crate::protocol::{CreateEventRequest, EventDetails, NewSession};
use crate::session::Session;

/// Opaque publication code; the lookup key of a published event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareCode(String);

impl ShareCode {
    pub fn new(code: impl Into<String>) -> Self {
        ShareCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Event name and date as the organizer fills them in. Both may still be
/// missing while drafting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMeta {
    pub name: String,
    pub event_date: Option<NaiveDate>,
}

impl EventMeta {
    pub fn new(name: impl Into<String>, event_date: NaiveDate) -> Self {
        EventMeta {
            name: name.into(),
            event_date: Some(event_date),
        }
    }

    /// The date, or the validation failure explaining why it is required.
    pub fn require_date(&self) -> AgendaResult<NaiveDate> {
        self.event_date
            .ok_or(AgendaError::Validation(ValidationFailure::MissingEventDate))
    }

    /// Build the creation request for a draft, checking every required field.
    pub fn creation_request(&self, sessions: &[Session]) -> AgendaResult<CreateEventRequest> {
        if self.name.trim().is_empty() {
            return Err(ValidationFailure::MissingEventName.into());
        }
        let event_date = self.require_date()?;
        if sessions.is_empty() {
            return Err(ValidationFailure::NoSessions.into());
        }

        Ok(CreateEventRequest {
            name: self.name.clone(),
            event_date,
            sessions: sessions.iter().map(NewSession::from).collect(),
        })
    }
}

/// A published event with server-sourced sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    pub name: String,
    pub event_date: NaiveDate,
    pub share_code: ShareCode,
    /// Server-returned order; the first entry anchors calendar export.
    pub sessions: Vec<Session>,
}

impl PublishedEvent {
    pub fn first_session(&self) -> Option<&Session> {
        self.sessions.first()
    }
}

impl TryFrom<EventDetails> for PublishedEvent {
    type Error = AgendaError;

    fn try_from(details: EventDetails) -> AgendaResult<Self> {
        let sessions = details
            .sessions
            .into_iter()
            .map(|record| {
                Session::with_times(
                    record.id.clone().into(),
                    &record.title,
                    record.location.as_deref().unwrap_or_default(),
                    record.start_time,
                    record.end_time,
                )
                .map_err(|e| {
                    AgendaError::Collaborator(format!("stored session {} is invalid: {}", record.id.0, e))
                })
            })
            .collect::<AgendaResult<Vec<_>>>()?;

        Ok(PublishedEvent {
            name: details.name,
            event_date: details.event_date,
            share_code: details.share_code,
            sessions,
        })
    }
}

impl From<&PublishedEvent> for EventDetails {
    fn from(event: &PublishedEvent) -> Self {
        EventDetails {
            name: event.name.clone(),
            event_date: event.event_date,
            share_code: event.share_code.clone(),
            sessions: event.sessions.iter().filter_map(|s| s.try_into().ok()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionId;
    use crate::time::Clock;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 29).unwrap()
    }

    fn cake() -> Session {
        Session::create(SessionId::Transient(1), "Cake", 60, Clock::DEFAULT_ANCHOR).unwrap()
    }

    #[test]
    fn creation_request_requires_name_date_and_sessions() {
        let missing_name = EventMeta {
            name: String::new(),
            event_date: Some(date()),
        };
        assert!(matches!(
            missing_name.creation_request(&[cake()]),
            Err(AgendaError::Validation(ValidationFailure::MissingEventName))
        ));

        let missing_date = EventMeta {
            name: "BBQ".into(),
            event_date: None,
        };
        assert!(matches!(
            missing_date.creation_request(&[cake()]),
            Err(AgendaError::Validation(ValidationFailure::MissingEventDate))
        ));

        let meta = EventMeta::new("BBQ", date());
        assert!(matches!(
            meta.creation_request(&[]),
            Err(AgendaError::Validation(ValidationFailure::NoSessions))
        ));

        let req = meta.creation_request(&[cake()]).unwrap();
        assert_eq!(req.sessions.len(), 1);
        assert_eq!(req.sessions[0].start.to_string(), "09:00");
        assert_eq!(req.sessions[0].end.to_string(), "10:00");
    }

    #[test]
    fn details_with_inverted_session_are_rejected() {
        let json = r#"{
            "name": "BBQ",
            "eventDate": "2025-10-29",
            "shareCode": "AB12",
            "sessions": [{"id": 1, "title": "Cake", "startTime": "10:00", "endTime": "09:00"}]
        }"#;
        let details: EventDetails = serde_json::from_str(json).unwrap();
        let err = PublishedEvent::try_from(details).unwrap_err();
        assert!(err.is_retryable());
    }
}
