//! Share links for published events.

use crate::error::{AgendaError, AgendaResult};

/// Canonical share page for a publication code: `origin + "/s/" + code`.
///
/// The same URL is what a QR code should encode. An empty code means the
/// event has not been published.
pub fn share_url(origin: &str, code: &str) -> AgendaResult<String> {
    if code.is_empty() {
        return Err(AgendaError::NotPublished);
    }
    Ok(format!("{}/s/{}", origin, code))
}
