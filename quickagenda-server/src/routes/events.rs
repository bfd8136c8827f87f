//! Event endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use quickagenda_core::protocol::{CreateEventRequest, CreateEventResponse, SessionTimePatch};
use quickagenda_core::{EventStore, ShareCode};
use tracing::info;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", post(create_event))
        .route("/api/events/{code}", get(get_event))
        .route(
            "/api/events/{code}/sessions/{session_id}",
            patch(update_session_time),
        )
}

/// POST /api/events - Publish a new event
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    let created = state.store.create_event(&req).await?;
    info!(code = %created.share_code, name = %req.name, "Event created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/events/:code - Event details, or the .ics file for `:code.ics`
async fn get_event(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    if let Some(code) = code.strip_suffix(".ics") {
        let ics = state.store.fetch_ics(&ShareCode::new(code)).await?;
        let disposition = format!("attachment; filename=\"{}.ics\"", code);
        return Ok((
            [
                (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            ics,
        )
            .into_response());
    }

    let details = state.store.fetch_event(&ShareCode::new(code)).await?;
    Ok(Json(details).into_response())
}

/// PATCH /api/events/:code/sessions/:id - Move a session
async fn update_session_time(
    State(state): State<AppState>,
    Path((code, session_id)): Path<(String, String)>,
    Json(patch): Json<SessionTimePatch>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .patch_session_time(&ShareCode::new(code), &session_id, patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
