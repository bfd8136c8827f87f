//! Draft files: an event written out as TOML before it is published.
//!
//! ```toml
//! name = "BBQ"
//! date = "2025-10-29"
//!
//! [[sessions]]
//! title = "Cake"
//! duration = 60
//!
//! [[sessions]]
//! title = "Grill"
//! duration = "2h"
//! start = "12:00"
//! location = "Garden"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use quickagenda_core::{Clock, EventMeta, EventStore, ScheduleReconciler};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct DraftFile {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub sessions: Vec<DraftSession>,
}

#[derive(Debug, Deserialize)]
pub struct DraftSession {
    pub title: String,
    pub duration: DraftDuration,
    /// `HH:MM`; defaults to 09:00
    pub start: Option<String>,
    pub location: Option<String>,
}

/// Minutes as a number, or a humantime string such as `90m` or `1h 30m`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DraftDuration {
    Minutes(i64),
    Text(String),
}

impl DraftDuration {
    pub fn minutes(&self) -> Result<i64> {
        match self {
            DraftDuration::Minutes(m) => Ok(*m),
            DraftDuration::Text(text) => {
                let duration = humantime::parse_duration(text)
                    .with_context(|| format!("Could not parse duration: \"{}\"", text))?;
                Ok((duration.as_secs() / 60) as i64)
            }
        }
    }
}

impl DraftFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read draft {}", path.display()))?;
        let draft = Self::parse(&content)
            .with_context(|| format!("Invalid draft {}", path.display()))?;
        debug!(path = %path.display(), sessions = draft.sessions.len(), "Loaded draft");
        Ok(draft)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replay the draft through a fresh schedule, the same way an organizer
    /// would add sessions one at a time.
    pub fn into_schedule<S: EventStore>(self, store: S) -> Result<ScheduleReconciler<S>> {
        let mut schedule = ScheduleReconciler::with_meta(store, EventMeta::new(self.name, self.date));

        for (i, session) in self.sessions.iter().enumerate() {
            let minutes = session.duration.minutes()?;
            let anchor = match &session.start {
                Some(start) => start.parse::<Clock>()?,
                None => Clock::DEFAULT_ANCHOR,
            };

            let id = schedule
                .add_session_at(&session.title, minutes, anchor)
                .with_context(|| format!("Session {} (\"{}\")", i + 1, session.title))?;

            if let Some(location) = &session.location {
                schedule.set_session_location(&id, location)?;
            }
        }

        Ok(schedule)
    }
}
