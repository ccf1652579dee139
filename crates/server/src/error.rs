//! Server-boundary error type. Grounded on the teacher's
//! `server/src/lib.rs::ServerError` (one variant per HTTP failure mode,
//! mapped to a status code), trimmed to the surface this crate actually
//! exposes (no session/auth/websocket/webrtc — those backed Non-goals).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("company not found: {0}")]
    CompanyNotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<receptionist_core::Error> for ServerError {
    fn from(err: receptionist_core::Error) -> Self {
        match err {
            receptionist_core::Error::TemplateNotFound(id) => ServerError::TemplateNotFound(id),
            receptionist_core::Error::CompanyNotFound(id) => ServerError::CompanyNotFound(id),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::TemplateNotFound(_) | ServerError::CompanyNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
