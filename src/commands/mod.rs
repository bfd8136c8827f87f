pub mod ics;
pub mod link;
pub mod publish;
pub mod retime;
pub mod show;

use anyhow::Result;
use owo_colors::OwoColorize;
use quickagenda_core::{AgendaConfig, EventStore, ScheduleReconciler};

use crate::render::{Render, render_sessions};

/// Print the event header, its sessions, and the ways to share it.
pub fn print_event<S: EventStore>(schedule: &ScheduleReconciler<S>, config: &AgendaConfig) -> Result<()> {
    if let Some(event) = schedule.published() {
        println!("{}", event.render());
    }
    for line in render_sessions(&schedule.render_view()) {
        println!("{}", line);
    }
    println!();
    print_links(schedule, config)
}

pub fn print_links<S: EventStore>(schedule: &ScheduleReconciler<S>, config: &AgendaConfig) -> Result<()> {
    let origin = config.share_origin();

    println!("  {} {}", "Share:".dimmed(), schedule.share_url(origin)?);
    if let Some(link) = schedule.google_calendar_link(origin) {
        println!("  {} {}", "Google Calendar:".dimmed(), link);
    }
    println!(
        "  {} {}",
        ".ics:".dimmed(),
        schedule.ics_download_reference(&config.api_base)?
    );
    Ok(())
}
