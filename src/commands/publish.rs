use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use quickagenda_core::{AgendaConfig, EventStore};

use crate::commands::print_event;
use crate::draft::DraftFile;

pub async fn run<S: EventStore>(store: S, config: &AgendaConfig, draft: &Path) -> Result<()> {
    let mut schedule = DraftFile::load(draft)?.into_schedule(store)?;

    let code = schedule.publish().await?;

    println!("{} {}", "Published".green(), code.to_string().bold());
    println!();
    print_event(&schedule, config)
}
