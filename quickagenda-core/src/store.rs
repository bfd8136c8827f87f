//! Persistence port for published events.
//!
//! The schedule never talks to storage directly; it goes through an
//! [`EventStore`]. [`crate::client::HttpEventStore`] speaks to the HTTP API
//! and [`crate::memory::MemoryEventStore`] keeps everything in process.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgendaResult;
use crate::event::ShareCode;
use crate::protocol::{CreateEventRequest, CreateEventResponse, EventDetails, SessionTimePatch};

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Create a published event. Returns its share code.
    async fn create_event(&self, req: &CreateEventRequest) -> AgendaResult<CreateEventResponse>;

    /// Load an event by share code. An unknown code is
    /// [`crate::AgendaError::NotFound`], distinct from other failures.
    async fn fetch_event(&self, code: &ShareCode) -> AgendaResult<EventDetails>;

    /// Replace both times of one stored session.
    async fn patch_session_time(
        &self,
        code: &ShareCode,
        session_id: &str,
        patch: SessionTimePatch,
    ) -> AgendaResult<()>;

    /// The `.ics` document for an event.
    async fn fetch_ics(&self, code: &ShareCode) -> AgendaResult<String>;
}

#[async_trait]
impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    async fn create_event(&self, req: &CreateEventRequest) -> AgendaResult<CreateEventResponse> {
        (**self).create_event(req).await
    }

    async fn fetch_event(&self, code: &ShareCode) -> AgendaResult<EventDetails> {
        (**self).fetch_event(code).await
    }

    async fn patch_session_time(
        &self,
        code: &ShareCode,
        session_id: &str,
        patch: SessionTimePatch,
    ) -> AgendaResult<()> {
        (**self).patch_session_time(code, session_id, patch).await
    }

    async fn fetch_ics(&self, code: &ShareCode) -> AgendaResult<String> {
        (**self).fetch_ics(code).await
    }
}
