//! Request and response types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::processor::{ProcessError, ProcessedTask, RawTask};
use crate::session::SessionError;

/// Body of `POST /api/process-tasks`.
#[derive(Debug, Deserialize)]
pub struct ProcessTasksRequest {
    pub tasks: Vec<RawTask>,
}

/// Response envelope for task processing.
///
/// Also used as the error body on every endpoint, so clients always
/// see `{ success, error }` on failure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTasksResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_tasks: Option<Vec<ProcessedTask>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessTasksResponse {
    pub fn ok(processed_tasks: Vec<ProcessedTask>) -> Self {
        Self {
            success: true,
            processed_tasks: Some(processed_tasks),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            processed_tasks: None,
            error: Some(message.into()),
        }
    }
}

/// Readiness payload for `GET /api/process-tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub message: String,
    pub status: String,
    pub has_api_key: bool,
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub description: String,
}

/// Current session task list.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<RawTask>,
}

/// Error type for API handlers: a status code plus the structured
/// failure envelope the client renders verbatim.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ProcessTasksResponse::err(self.message))).into_response()
    }
}

impl From<&ProcessError> for ApiError {
    fn from(err: &ProcessError) -> Self {
        if err.is_validation() {
            return Self::new(StatusCode::BAD_REQUEST, err.to_string());
        }
        match err {
            ProcessError::MissingApiKey => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            // Upstream and parse failures get the original's generic prefix.
            _ => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to process tasks: {}", err),
            ),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}
