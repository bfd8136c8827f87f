use anyhow::Result;
use quickagenda_core::{AgendaConfig, EventStore, ScheduleReconciler, ShareCode};

use crate::commands::print_links;

pub async fn run<S: EventStore>(store: S, config: &AgendaConfig, code: &str) -> Result<()> {
    let schedule = ScheduleReconciler::open(store, &ShareCode::new(code)).await?;
    print_links(&schedule, config)
}
