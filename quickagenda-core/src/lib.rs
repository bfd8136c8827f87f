//! Core types for quickagenda.
//!
//! This crate provides everything between the organizer's input and the
//! event API:
//! - `time` and `session` for clock arithmetic and time-boxed sessions
//! - `schedule` for the draft/published working set ([`ScheduleReconciler`])
//! - `export` and `share` for calendar links and share URLs
//! - `store`, `client` and `memory` for persistence
//! - `ics` for `.ics` generation on the serving side

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod ics;
pub mod memory;
pub mod protocol;
pub mod schedule;
pub mod session;
pub mod share;
pub mod store;
pub mod time;

pub use client::HttpEventStore;
pub use config::AgendaConfig;
pub use error::{AgendaError, AgendaResult, UnsupportedOperation, ValidationFailure};
pub use event::{EventMeta, PublishedEvent, ShareCode};
pub use memory::MemoryEventStore;
pub use schedule::{Liveness, ScheduleReconciler, ScheduleState, SessionView, WorkingSet};
pub use session::{Session, SessionId};
pub use store::EventStore;
pub use time::Clock;
