//! HTTP route handlers

pub mod availability;
pub mod batting;
pub mod fielding;
pub mod reports;
pub mod roster;
pub mod schedule;
pub mod status;
pub mod team;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lineup_core::{ImportError, LineupError, RosterError, ScheduleError, UnknownPosition};
use serde_json::json;

/// Error body returned by every handler: `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<LineupError> for ApiError {
    fn from(err: LineupError) -> Self {
        let message = err.to_string();
        match err {
            LineupError::Roster(RosterError::UnknownPlayer(_))
            | LineupError::Schedule(ScheduleError::UnknownGame(_))
            | LineupError::Schedule(ScheduleError::InningOutOfRange { .. }) => Self::not_found(message),
            _ => Self::bad_request(message),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<UnknownPosition> for ApiError {
    fn from(err: UnknownPosition) -> Self {
        Self::bad_request(err.to_string())
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
