//! Terminal rendering for quickagenda types.
//!
//! Extension traits that add colored output to quickagenda-core types
//! using owo_colors.

use owo_colors::OwoColorize;
use quickagenda_core::{PublishedEvent, SessionView};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for SessionView<'_> {
    fn render(&self) -> String {
        let session = self.session;
        let time = format!("{}-{}", session.start_time(), session.end_time());

        let mut line = format!(
            "{} {} {}",
            hour_bar(self.start_hour, self.end_hour).cyan(),
            time.dimmed(),
            session.title.bold()
        );
        if !session.location.is_empty() {
            line.push_str(&format!(" @ {}", session.location).dimmed().to_string());
        }
        line.push_str(&format!(" [{}]", session.id).dimmed().to_string());
        line
    }
}

impl Render for PublishedEvent {
    fn render(&self) -> String {
        format!(
            "📅 {} {}",
            self.name.bold(),
            self.event_date.format("%A, %B %-d").to_string().dimmed()
        )
    }
}

/// A 24-hour strip with the session's hours filled in. Sessions shorter
/// than an hour still mark their starting hour.
fn hour_bar(start_hour: u8, end_hour: u8) -> String {
    let end_hour = end_hour.max(start_hour + 1);
    (0..24u8)
        .map(|hour| {
            if hour >= start_hour && hour < end_hour {
                '█'
            } else {
                '·'
            }
        })
        .collect()
}

/// Render every session of a schedule, one line each.
pub fn render_sessions(views: &[SessionView<'_>]) -> Vec<String> {
    if views.is_empty() {
        return vec![format!("   {}", "(no sessions)".dimmed())];
    }
    views.iter().map(|v| format!("   {}", v.render())).collect()
}
