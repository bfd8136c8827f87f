//! Error types for quickagenda.

use thiserror::Error;

use crate::session::SessionId;
use crate::time::Clock;

/// Errors that can occur in quickagenda operations.
///
/// None of these are fatal: every operation that returns one leaves the
/// schedule in its last valid state.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    #[error("{0}")]
    Unsupported(#[from] UnsupportedOperation),

    #[error("Session not found: {0}")]
    UnknownSession(SessionId),

    #[error("Event has not been published yet")]
    NotPublished,

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Persistence request failed: {0}")]
    Collaborator(String),

    #[error("Schedule was closed before the request completed")]
    Discarded,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rejected request the user can correct.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Please enter an event name")]
    MissingEventName,

    #[error("Please enter an event date")]
    MissingEventDate,

    #[error("Please enter a session title")]
    EmptyTitle,

    #[error("Please add at least one session")]
    NoSessions,

    #[error("Session must end after it starts ({start} - {end})")]
    InvalidOrder { start: Clock, end: Clock },

    #[error("Hour {0} is outside the day")]
    HourOutOfRange(u8),

    #[error("Could not read time \"{0}\", expected HH:MM")]
    MalformedTime(String),
}

/// Operations that are outside the current scope rather than mistakes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedOperation {
    #[error("Event already created. Adding new sessions after creation is not supported yet.")]
    AddSessionAfterPublish,

    #[error("Event already created. It cannot be published a second time.")]
    Republish,

    #[error("Event already created. Its name and date can no longer be changed.")]
    EditPublishedDetails,
}

impl AgendaError {
    /// True for failures caused by the persistence collaborator, which the
    /// user may simply retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AgendaError::Collaborator(_))
    }
}

/// Result type alias for quickagenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
