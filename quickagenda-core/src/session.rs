//! Sessions: the time-boxed building blocks of an event.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AgendaResult, ValidationFailure};
use crate::time::{Clock, add_minutes, hour_to_clock};

/// Identity of a session.
///
/// Drafts use client-side counters; once published the server assigns its
/// own ids. The two never compare equal, even if they render the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionId {
    Transient(u64),
    Persisted(String),
}

impl SessionId {
    pub fn is_persisted(&self) -> bool {
        matches!(self, SessionId::Persisted(_))
    }

    pub fn as_persisted(&self) -> Option<&str> {
        match self {
            SessionId::Persisted(id) => Some(id),
            SessionId::Transient(_) => None,
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionId::Transient(n) => write!(f, "tmp-{}", n),
            SessionId::Persisted(id) => write!(f, "{}", id),
        }
    }
}

/// Server-assigned session id as it appears on the wire.
///
/// Accepts both JSON strings and integers so that stores with numeric
/// primary keys work unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PersistedId(pub String);

impl<'de> Deserialize<'de> for PersistedId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => PersistedId(s),
            RawId::Number(n) => PersistedId(n.to_string()),
        })
    }
}

impl From<PersistedId> for SessionId {
    fn from(id: PersistedId) -> Self {
        SessionId::Persisted(id.0)
    }
}

/// Issues transient ids, unique for the lifetime of one draft.
#[derive(Debug, Default)]
pub struct TransientIds {
    next: u64,
}

impl TransientIds {
    pub fn next_id(&mut self) -> SessionId {
        self.next += 1;
        SessionId::Transient(self.next)
    }
}

/// A single time-boxed session.
///
/// `start_time < end_time` holds for every value of this type that leaves
/// this module; mutators reject changes that would break it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub location: String,
    start_time: Clock,
    end_time: Clock,
}

impl Session {
    /// Create a session of `duration_minutes` starting at `anchor`.
    ///
    /// The end is computed with [`add_minutes`], so it is clamped to the
    /// day. A title that is blank, or a duration that clamps to nothing,
    /// is rejected.
    pub fn create(
        id: SessionId,
        title: &str,
        duration_minutes: i64,
        anchor: Clock,
    ) -> AgendaResult<Self> {
        let end = add_minutes(anchor, duration_minutes);
        Self::with_times(id, title, "", anchor, end)
    }

    /// Build a session from explicit times (used when loading stored records).
    pub fn with_times(
        id: SessionId,
        title: &str,
        location: &str,
        start: Clock,
        end: Clock,
    ) -> AgendaResult<Self> {
        if title.trim().is_empty() {
            return Err(ValidationFailure::EmptyTitle.into());
        }
        check_order(start, end)?;

        Ok(Session {
            id,
            title: title.to_string(),
            location: location.to_string(),
            start_time: start,
            end_time: end,
        })
    }

    pub fn start_time(&self) -> Clock {
        self.start_time
    }

    pub fn end_time(&self) -> Clock {
        self.end_time
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes_since_midnight() - self.start_time.minutes_since_midnight()
    }

    /// Replace both times. On an ordering violation the session is left
    /// untouched.
    pub fn set_times(&mut self, start: Clock, end: Clock) -> AgendaResult<()> {
        check_order(start, end)?;
        self.start_time = start;
        self.end_time = end;
        Ok(())
    }

    /// Hour-granularity variant of [`Session::set_times`]. Any minutes the
    /// session held are dropped.
    pub fn set_times_by_hour(&mut self, start_hour: u8, end_hour: u8) -> AgendaResult<()> {
        let (start, end) = hours_to_clocks(start_hour, end_hour)?;
        self.set_times(start, end)
    }
}

/// Map a pair of grid hours to clock times, rejecting hours past the day.
pub fn hours_to_clocks(start_hour: u8, end_hour: u8) -> AgendaResult<(Clock, Clock)> {
    let start = hour_to_clock(start_hour).ok_or(ValidationFailure::HourOutOfRange(start_hour))?;
    let end = hour_to_clock(end_hour).ok_or(ValidationFailure::HourOutOfRange(end_hour))?;
    Ok((start, end))
}

fn check_order(start: Clock, end: Clock) -> AgendaResult<()> {
    if start >= end {
        return Err(ValidationFailure::InvalidOrder { start, end }.into());
    }
    Ok(())
}
