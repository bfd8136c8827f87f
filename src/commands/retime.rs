use anyhow::Result;
use owo_colors::OwoColorize;
use quickagenda_core::session::PersistedId;
use quickagenda_core::time::hour_to_clock;
use quickagenda_core::{
    AgendaConfig, Clock, EventStore, ScheduleReconciler, SessionId, ShareCode, ValidationFailure,
};

use crate::commands::print_event;

/// A time given on the command line: a bare hour, or `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeArg {
    Hour(u8),
    Clock(Clock),
}

impl TimeArg {
    fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            let hour: u8 = input.parse()?;
            return Ok(TimeArg::Hour(hour));
        }
        Ok(TimeArg::Clock(input.parse()?))
    }

    fn to_clock(self) -> Result<Clock> {
        match self {
            TimeArg::Clock(clock) => Ok(clock),
            TimeArg::Hour(hour) => {
                Ok(hour_to_clock(hour).ok_or(ValidationFailure::HourOutOfRange(hour))?)
            }
        }
    }
}

pub async fn run<S: EventStore>(
    store: S,
    config: &AgendaConfig,
    code: &str,
    session: String,
    start: &str,
    end: &str,
) -> Result<()> {
    let start = TimeArg::parse(start)?;
    let end = TimeArg::parse(end)?;

    let mut schedule = ScheduleReconciler::open(store, &ShareCode::new(code)).await?;
    let id = SessionId::from(PersistedId(session));

    match (start, end) {
        (TimeArg::Hour(start), TimeArg::Hour(end)) => {
            schedule.update_session_by_hour(&id, start, end).await?
        }
        (start, end) => {
            schedule
                .update_session_time(&id, start.to_clock()?, end.to_clock()?)
                .await?
        }
    }

    println!("{} session {}", "Moved".green(), id.to_string().bold());
    println!();
    print_event(&schedule, config)
}
