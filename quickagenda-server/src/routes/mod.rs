pub mod events;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quickagenda_core::AgendaError;
use quickagenda_core::protocol::ErrorResponse;
use tracing::error;

/// Convert core errors to HTTP responses with a `{error}` body
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        let status = match &err {
            AgendaError::Validation(_) | AgendaError::Unsupported(_) => StatusCode::BAD_REQUEST,
            AgendaError::NotFound(_) | AgendaError::UnknownSession(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }

        AppError {
            status,
            message: err.to_string(),
        }
    }
}
