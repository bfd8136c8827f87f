//! The organizer's schedule: one working set of sessions and the one-shot
//! transition from draft to published.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{AgendaError, AgendaResult, UnsupportedOperation};
use crate::event::{EventMeta, PublishedEvent, ShareCode};
use crate::export::{google_calendar_link, ics_download_reference};
use crate::protocol::SessionTimePatch;
use crate::session::{Session, SessionId, TransientIds, hours_to_clocks};
use crate::share::share_url;
use crate::store::EventStore;
use crate::time::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Draft,
    Published,
}

/// The single session list presentation reads: the organizer's draft or
/// the server's published copy, never both.
#[derive(Debug, Clone)]
pub enum WorkingSet {
    Draft(Vec<Session>),
    Published(PublishedEvent),
}

impl WorkingSet {
    pub fn sessions(&self) -> &[Session] {
        match self {
            WorkingSet::Draft(sessions) => sessions,
            WorkingSet::Published(event) => &event.sessions,
        }
    }

    pub fn state(&self) -> ScheduleState {
        match self {
            WorkingSet::Draft(_) => ScheduleState::Draft,
            WorkingSet::Published(_) => ScheduleState::Published,
        }
    }
}

/// Cancel handle for a schedule.
///
/// Once cancelled, results of requests still in flight are thrown away
/// instead of being applied.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Liveness(Arc::new(AtomicBool::new(true)))
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A session annotated with the hours presentation draws it at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView<'a> {
    pub session: &'a Session,
    pub start_hour: u8,
    pub end_hour: u8,
}

#[derive(Debug)]
pub struct ScheduleReconciler<S> {
    store: S,
    meta: EventMeta,
    working_set: WorkingSet,
    ids: TransientIds,
    liveness: Liveness,
}

impl<S: EventStore> ScheduleReconciler<S> {
    /// Start an empty draft.
    pub fn new(store: S) -> Self {
        Self::with_meta(store, EventMeta::default())
    }

    pub fn with_meta(store: S, meta: EventMeta) -> Self {
        ScheduleReconciler {
            store,
            meta,
            working_set: WorkingSet::Draft(Vec::new()),
            ids: TransientIds::default(),
            liveness: Liveness::new(),
        }
    }

    /// Open an already published event by its share code (the viewer path).
    pub async fn open(store: S, code: &ShareCode) -> AgendaResult<Self> {
        let details = store.fetch_event(code).await?;
        let event = PublishedEvent::try_from(details)?;
        debug!(code = %code, sessions = event.sessions.len(), "Opened published event");

        Ok(ScheduleReconciler {
            store,
            meta: EventMeta::new(event.name.clone(), event.event_date),
            working_set: WorkingSet::Published(event),
            ids: TransientIds::default(),
            liveness: Liveness::new(),
        })
    }

    pub fn state(&self) -> ScheduleState {
        self.working_set.state()
    }

    pub fn is_published(&self) -> bool {
        self.state() == ScheduleState::Published
    }

    /// Whether a publish request could currently go ahead.
    pub fn can_publish(&self) -> bool {
        matches!(&self.working_set, WorkingSet::Draft(s) if !s.is_empty())
    }

    pub fn meta(&self) -> &EventMeta {
        &self.meta
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn sessions(&self) -> &[Session] {
        self.working_set.sessions()
    }

    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions().iter().find(|s| &s.id == id)
    }

    pub fn published(&self) -> Option<&PublishedEvent> {
        match &self.working_set {
            WorkingSet::Published(event) => Some(event),
            WorkingSet::Draft(_) => None,
        }
    }

    pub fn share_code(&self) -> Option<&ShareCode> {
        self.published().map(|event| &event.share_code)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Mark the schedule as gone. Requests still in flight will not be
    /// applied.
    pub fn teardown(&self) {
        self.liveness.cancel();
    }

    fn ensure_alive(&self) -> AgendaResult<()> {
        if self.liveness.is_alive() {
            Ok(())
        } else {
            warn!("Discarding result for a closed schedule");
            Err(AgendaError::Discarded)
        }
    }

    pub fn set_event_name(&mut self, name: &str) -> AgendaResult<()> {
        if self.is_published() {
            return Err(UnsupportedOperation::EditPublishedDetails.into());
        }
        self.meta.name = name.to_string();
        Ok(())
    }

    pub fn set_event_date(&mut self, date: NaiveDate) -> AgendaResult<()> {
        if self.is_published() {
            return Err(UnsupportedOperation::EditPublishedDetails.into());
        }
        self.meta.event_date = Some(date);
        Ok(())
    }

    /// Append a session at the default 09:00 anchor.
    pub fn add_session(&mut self, title: &str, duration_minutes: i64) -> AgendaResult<SessionId> {
        self.add_session_at(title, duration_minutes, Clock::DEFAULT_ANCHOR)
    }

    pub fn add_session_at(
        &mut self,
        title: &str,
        duration_minutes: i64,
        anchor: Clock,
    ) -> AgendaResult<SessionId> {
        let WorkingSet::Draft(sessions) = &mut self.working_set else {
            return Err(UnsupportedOperation::AddSessionAfterPublish.into());
        };
        self.meta.require_date()?;

        let session = Session::create(self.ids.next_id(), title, duration_minutes, anchor)?;
        let id = session.id.clone();
        debug!(session = %id, start = %session.start_time(), end = %session.end_time(), "Added draft session");
        sessions.push(session);
        Ok(id)
    }

    pub fn set_session_location(&mut self, id: &SessionId, location: &str) -> AgendaResult<()> {
        let WorkingSet::Draft(sessions) = &mut self.working_set else {
            return Err(UnsupportedOperation::EditPublishedDetails.into());
        };
        let session = sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| AgendaError::UnknownSession(id.clone()))?;
        session.location = location.to_string();
        Ok(())
    }

    /// Change a session's times.
    ///
    /// Drafts are edited in place. Published sessions are patched through
    /// the store first and only updated locally once the store accepted the
    /// change; on failure the working set is untouched.
    ///
    /// Edits made to the same session from another schedule are not
    /// coordinated with this one: the store keeps whichever patch it
    /// received last.
    pub async fn update_session_time(
        &mut self,
        id: &SessionId,
        start: Clock,
        end: Clock,
    ) -> AgendaResult<()> {
        let (index, code, session_id, updated) = match &mut self.working_set {
            WorkingSet::Draft(sessions) => {
                let session = sessions
                    .iter_mut()
                    .find(|s| &s.id == id)
                    .ok_or_else(|| AgendaError::UnknownSession(id.clone()))?;
                return session.set_times(start, end);
            }
            WorkingSet::Published(event) => {
                let index = event
                    .sessions
                    .iter()
                    .position(|s| &s.id == id)
                    .ok_or_else(|| AgendaError::UnknownSession(id.clone()))?;
                let session_id = id
                    .as_persisted()
                    .ok_or_else(|| AgendaError::UnknownSession(id.clone()))?
                    .to_string();

                let mut updated = event.sessions[index].clone();
                updated.set_times(start, end)?;
                (index, event.share_code.clone(), session_id, updated)
            }
        };

        self.ensure_alive()?;
        self.store
            .patch_session_time(&code, &session_id, SessionTimePatch { start, end })
            .await
            .inspect_err(|e| warn!(code = %code, session = %session_id, error = %e, "Session time update failed"))?;
        self.ensure_alive()?;

        if let WorkingSet::Published(event) = &mut self.working_set {
            event.sessions[index] = updated;
        }
        debug!(code = %code, session = %session_id, start = %start, end = %end, "Session time updated");
        Ok(())
    }

    /// Hour-granularity edit, as driven by a calendar grid.
    pub async fn update_session_by_hour(
        &mut self,
        id: &SessionId,
        start_hour: u8,
        end_hour: u8,
    ) -> AgendaResult<()> {
        let (start, end) = hours_to_clocks(start_hour, end_hour)?;
        self.update_session_time(id, start, end).await
    }

    /// Publish the draft.
    ///
    /// Creates the event, then loads it back to obtain persisted session
    /// ids. The working set switches to the published copy only after both
    /// calls succeeded. Publishing is one-shot.
    pub async fn publish(&mut self) -> AgendaResult<ShareCode> {
        let WorkingSet::Draft(sessions) = &self.working_set else {
            return Err(UnsupportedOperation::Republish.into());
        };
        let request = self.meta.creation_request(sessions)?;

        self.ensure_alive()?;
        let created = self
            .store
            .create_event(&request)
            .await
            .inspect_err(|e| warn!(error = %e, "Event creation failed"))?;
        self.ensure_alive()?;

        let details = self
            .store
            .fetch_event(&created.share_code)
            .await
            .inspect_err(|e| warn!(code = %created.share_code, error = %e, "Loading created event failed"))?;
        self.ensure_alive()?;

        let event = PublishedEvent::try_from(details)?;
        if event.share_code != created.share_code {
            return Err(AgendaError::Collaborator(format!(
                "Server returned event {} for {}",
                event.share_code, created.share_code
            )));
        }

        info!(code = %event.share_code, sessions = event.sessions.len(), "Event published");
        self.meta = EventMeta::new(event.name.clone(), event.event_date);
        self.working_set = WorkingSet::Published(event);
        Ok(created.share_code)
    }

    /// Every session in the working set with its start and end hour.
    pub fn render_view(&self) -> Vec<SessionView<'_>> {
        self.sessions()
            .iter()
            .map(|session| SessionView {
                session,
                start_hour: session.start_time().hour(),
                end_hour: session.end_time().hour(),
            })
            .collect()
    }

    pub fn share_url(&self, origin: &str) -> AgendaResult<String> {
        let code = self.share_code().map(ShareCode::as_str).unwrap_or_default();
        share_url(origin, code)
    }

    /// `None` for drafts and for events without sessions.
    pub fn google_calendar_link(&self, origin: &str) -> Option<String> {
        google_calendar_link(self.published()?, origin)
    }

    pub fn ics_download_reference(&self, api_base: &str) -> AgendaResult<String> {
        let code = self.share_code().ok_or(AgendaError::NotPublished)?;
        Ok(ics_download_reference(api_base, code))
    }
}

impl<S> Drop for ScheduleReconciler<S> {
    fn drop(&mut self) {
        self.liveness.cancel();
    }
}
