// Shared HTTP response types and error mapping for the JSON API.

use crate::domain::errors::GameError;
use axum::{Json, http::StatusCode};
use tracing::warn;

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

// Maps domain errors to HTTP responses.
pub fn map_game_error(err: GameError) -> ApiError {
    let status = match &err {
        GameError::GameNotFound(_) | GameError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
        GameError::NotYourTurn { .. }
        | GameError::GameInactive(_)
        | GameError::GameFull(_)
        | GameError::TurnInProgress(_) => StatusCode::CONFLICT,
        GameError::StorageFailure(detail) => {
            warn!(error = %detail, "storage failure");
            return error_response(StatusCode::BAD_GATEWAY, "storage error");
        }
    };
    error_response(status, &err.to_string())
}

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
