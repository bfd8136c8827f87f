//! In-process event store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AgendaError, AgendaResult, ValidationFailure};
use crate::event::{PublishedEvent, ShareCode};
use crate::ics::generate_ics;
use crate::protocol::{CreateEventRequest, CreateEventResponse, EventDetails, SessionTimePatch};
use crate::session::{Session, SessionId};
use crate::store::EventStore;

const SHARE_CODE_LEN: usize = 8;

/// Keeps published events in memory, keyed by share code.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Arc<Mutex<HashMap<ShareCode, PublishedEvent>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|events| events.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> AgendaResult<MutexGuard<'_, HashMap<ShareCode, PublishedEvent>>> {
        self.events
            .lock()
            .map_err(|_| AgendaError::Collaborator("event store lock poisoned".into()))
    }

    /// Validate a creation request and turn it into a stored event, with
    /// session ids numbered from 1 in request order.
    fn build_event(req: &CreateEventRequest, share_code: ShareCode) -> AgendaResult<PublishedEvent> {
        if req.name.trim().is_empty() {
            return Err(ValidationFailure::MissingEventName.into());
        }
        if req.sessions.is_empty() {
            return Err(ValidationFailure::NoSessions.into());
        }

        let sessions = req
            .sessions
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Session::with_times(
                    SessionId::Persisted((i + 1).to_string()),
                    &s.title,
                    &s.location,
                    s.start,
                    s.end,
                )
            })
            .collect::<AgendaResult<Vec<_>>>()?;

        Ok(PublishedEvent {
            name: req.name.clone(),
            event_date: req.event_date,
            share_code,
            sessions,
        })
    }
}

fn new_share_code() -> ShareCode {
    let hex = Uuid::new_v4().simple().to_string();
    ShareCode::new(hex[..SHARE_CODE_LEN].to_uppercase())
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn create_event(&self, req: &CreateEventRequest) -> AgendaResult<CreateEventResponse> {
        let mut events = self.lock()?;

        let mut share_code = new_share_code();
        while events.contains_key(&share_code) {
            share_code = new_share_code();
        }

        let event = Self::build_event(req, share_code.clone())?;
        info!(code = %share_code, sessions = event.sessions.len(), "Stored new event");
        events.insert(share_code.clone(), event);

        Ok(CreateEventResponse { share_code })
    }

    async fn fetch_event(&self, code: &ShareCode) -> AgendaResult<EventDetails> {
        let events = self.lock()?;
        let event = events
            .get(code)
            .ok_or_else(|| AgendaError::NotFound(code.to_string()))?;
        Ok(EventDetails::from(event))
    }

    async fn patch_session_time(
        &self,
        code: &ShareCode,
        session_id: &str,
        patch: SessionTimePatch,
    ) -> AgendaResult<()> {
        let mut events = self.lock()?;
        let event = events
            .get_mut(code)
            .ok_or_else(|| AgendaError::NotFound(code.to_string()))?;

        let id = SessionId::Persisted(session_id.to_string());
        let session = event
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AgendaError::UnknownSession(id))?;

        session.set_times(patch.start, patch.end)?;
        debug!(code = %code, session = session_id, start = %patch.start, end = %patch.end, "Patched session time");
        Ok(())
    }

    async fn fetch_ics(&self, code: &ShareCode) -> AgendaResult<String> {
        let events = self.lock()?;
        let event = events
            .get(code)
            .ok_or_else(|| AgendaError::NotFound(code.to_string()))?;
        Ok(generate_ics(event))
    }
}
