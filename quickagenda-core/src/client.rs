//! HTTP client for the event API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::AgendaConfig;
use crate::error::{AgendaError, AgendaResult};
use crate::event::ShareCode;
use crate::protocol::{
    CreateEventRequest, CreateEventResponse, ErrorResponse, EventDetails, SessionTimePatch,
};
use crate::store::EventStore;

/// [`EventStore`] backed by the HTTP API (`/api/events/...`).
pub struct HttpEventStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpEventStore {
    pub fn new(base_url: &str, timeout: Duration) -> AgendaResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AgendaError::Config(format!("Invalid API base '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AgendaError::Config(format!(
                "Invalid API base '{}': not a base URL",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgendaError::Config(format!("Could not build HTTP client: {}", e)))?;

        Ok(HttpEventStore { http, base_url })
    }

    pub fn from_config(config: &AgendaConfig) -> AgendaResult<Self> {
        Self::new(&config.api_base, config.request_timeout())
    }

    /// `<base>/api/events/<segments...>`, with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "events"]).extend(segments);
        }
        url
    }
}

fn request_failed(e: reqwest::Error) -> AgendaError {
    AgendaError::Collaborator(format!("Failed to reach server: {}", e))
}

/// Turn a non-success response into a collaborator failure, using the
/// server's `{error}` body when it sent one.
async fn failure(resp: Response) -> AgendaError {
    let status = resp.status();
    match resp.json::<ErrorResponse>().await {
        Ok(body) => AgendaError::Collaborator(format!("{} ({})", body.error, status)),
        Err(_) => AgendaError::Collaborator(format!("Server responded with {}", status)),
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(resp: Response) -> AgendaResult<T> {
    resp.json()
        .await
        .map_err(|e| AgendaError::Collaborator(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl EventStore for HttpEventStore {
    /// POST /api/events
    async fn create_event(&self, req: &CreateEventRequest) -> AgendaResult<CreateEventResponse> {
        let url = self.endpoint(&[]);
        debug!(%url, sessions = req.sessions.len(), "Creating event");

        let resp = self
            .http
            .post(url)
            .json(req)
            .send()
            .await
            .map_err(request_failed)?;

        if !resp.status().is_success() {
            return Err(failure(resp).await);
        }

        read_json(resp).await
    }

    /// GET /api/events/:code
    async fn fetch_event(&self, code: &ShareCode) -> AgendaResult<EventDetails> {
        let url = self.endpoint(&[code.as_str()]);
        debug!(%url, "Fetching event");

        let resp = self.http.get(url).send().await.map_err(request_failed)?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AgendaError::NotFound(code.to_string()));
        }
        if !resp.status().is_success() {
            return Err(failure(resp).await);
        }

        read_json(resp).await
    }

    /// PATCH /api/events/:code/sessions/:id
    async fn patch_session_time(
        &self,
        code: &ShareCode,
        session_id: &str,
        patch: SessionTimePatch,
    ) -> AgendaResult<()> {
        let url = self.endpoint(&[code.as_str(), "sessions", session_id]);
        debug!(%url, start = %patch.start, end = %patch.end, "Patching session time");

        let resp = self
            .http
            .patch(url)
            .json(&patch)
            .send()
            .await
            .map_err(request_failed)?;

        if !resp.status().is_success() {
            return Err(failure(resp).await);
        }

        Ok(())
    }

    /// GET /api/events/:code.ics
    async fn fetch_ics(&self, code: &ShareCode) -> AgendaResult<String> {
        let file = format!("{}.ics", code);
        let url = self.endpoint(&[file.as_str()]);
        debug!(%url, "Fetching ics");

        let resp = self.http.get(url).send().await.map_err(request_failed)?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AgendaError::NotFound(code.to_string()));
        }
        if !resp.status().is_success() {
            return Err(failure(resp).await);
        }

        resp.text().await.map_err(request_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> HttpEventStore {
        HttpEventStore::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoints_are_built_under_api_events() {
        let s = store("http://127.0.0.1:4096");
        assert_eq!(s.endpoint(&[]).as_str(), "http://127.0.0.1:4096/api/events");
        assert_eq!(
            s.endpoint(&["AB12", "sessions", "3"]).as_str(),
            "http://127.0.0.1:4096/api/events/AB12/sessions/3"
        );
    }

    #[test]
    fn endpoints_keep_base_path_and_encode_segments() {
        let s = store("https://x.test/agenda/");
        assert_eq!(
            s.endpoint(&["a b"]).as_str(),
            "https://x.test/agenda/api/events/a%20b"
        );
    }

    #[test]
    fn invalid_base_is_config_error() {
        assert!(matches!(
            HttpEventStore::new("not a url", Duration::from_secs(1)),
            Err(AgendaError::Config(_))
        ));
        assert!(matches!(
            HttpEventStore::new("mailto:me@x.test", Duration::from_secs(1)),
            Err(AgendaError::Config(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_collaborator_failure() {
        // Port 9 (discard) is not expected to serve HTTP.
        let s = store("http://127.0.0.1:9");
        let err = s.fetch_event(&ShareCode::new("AB12")).await.unwrap_err();
        assert!(err.is_retryable(), "{err:?}");
    }
}
