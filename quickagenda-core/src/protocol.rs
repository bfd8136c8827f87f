//! JSON bodies exchanged with the event API.
//!
//! Field names follow the API's camelCase convention. Session times are
//! `HH:MM` strings; ISO datetimes are also accepted when reading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::ShareCode;
use crate::session::{PersistedId, Session, SessionId};
use crate::time::Clock;

/// Body of `POST /api/events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub event_date: NaiveDate,
    pub sessions: Vec<NewSession>,
}

/// A session inside a creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub title: String,
    pub start: Clock,
    pub end: Clock,
    #[serde(default)]
    pub location: String,
}

impl From<&Session> for NewSession {
    fn from(session: &Session) -> Self {
        NewSession {
            title: session.title.clone(),
            start: session.start_time(),
            end: session.end_time(),
            location: session.location.clone(),
        }
    }
}

/// Response of `POST /api/events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    pub share_code: ShareCode,
}

/// Response of `GET /api/events/{code}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub name: String,
    pub event_date: NaiveDate,
    pub share_code: ShareCode,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

/// A stored session as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: PersistedId,
    pub title: String,
    pub start_time: Clock,
    pub end_time: Clock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl TryFrom<&Session> for SessionRecord {
    type Error = SessionId;

    /// Only persisted sessions have a record form; a transient id is
    /// handed back as the error.
    fn try_from(session: &Session) -> Result<Self, Self::Error> {
        let id = session
            .id
            .as_persisted()
            .ok_or_else(|| session.id.clone())?;

        Ok(SessionRecord {
            id: PersistedId(id.to_string()),
            title: session.title.clone(),
            start_time: session.start_time(),
            end_time: session.end_time(),
            location: Some(session.location.clone()),
        })
    }
}

/// Body of `PATCH /api/events/{code}/sessions/{id}`. Both fields are
/// always sent together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimePatch {
    pub start: Clock,
    pub end: Clock,
}

/// Standard API error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_camel_case() {
        let req = CreateEventRequest {
            name: "BBQ".into(),
            event_date: NaiveDate::from_ymd_opt(2025, 10, 29).unwrap(),
            sessions: vec![NewSession {
                title: "Cake".into(),
                start: "09:00".parse().unwrap(),
                end: "10:00".parse().unwrap(),
                location: String::new(),
            }],
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "BBQ",
                "eventDate": "2025-10-29",
                "sessions": [{"title": "Cake", "start": "09:00", "end": "10:00", "location": ""}]
            })
        );
    }

    #[test]
    fn details_accept_iso_times_and_missing_location() {
        let json = r#"{
            "name": "BBQ",
            "eventDate": "2025-10-29",
            "shareCode": "AB12",
            "sessions": [
                {"id": 3, "title": "Grill", "startTime": "2025-10-29T15:00:00", "endTime": "2025-10-29T17:30:00"}
            ]
        }"#;

        let details: EventDetails = serde_json::from_str(json).unwrap();
        let record = &details.sessions[0];
        assert_eq!(record.id, PersistedId("3".into()));
        assert_eq!(record.start_time.to_string(), "15:00");
        assert_eq!(record.end_time.to_string(), "17:30");
        assert_eq!(record.location, None);
    }
}
