//! API error handling.
//!
//! Handlers and extractors fail with [`ApiError`]. Its response carries the
//! status and message as a response extension; [`render_error_body`] then
//! writes the JSON error body, which needs the request path and a timestamp
//! that the error itself does not know.

use super::AppState;
use crate::project::services::ProjectServiceError;
use crate::task::services::TaskServiceError;
use crate::validation::FieldViolations;
use axum::{
    Json,
    extract::{
        Request, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Message returned for failures whose details must not reach clients.
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Message returned with per-field validation failures.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// JSON error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// When the error was rendered.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    pub status: u16,
    /// Human-readable message.
    pub error: String,
    /// Request path.
    pub path: String,
    /// Field name to message, present only for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<FieldViolations>,
}

/// Error raised at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    validation_errors: Option<FieldViolations>,
}

impl ApiError {
    /// Creates an error with a status and client-facing message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            validation_errors: None,
        }
    }

    /// Creates a 400 response carrying per-field messages.
    #[must_use]
    pub fn validation(violations: FieldViolations) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: VALIDATION_FAILED.to_owned(),
            validation_errors: Some(violations),
        }
    }

    /// Creates a 400 response without field details.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 response.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Logs `detail` and creates a 500 response with a generic message.
    #[must_use]
    pub fn internal(detail: &dyn std::error::Error) -> Self {
        tracing::error!(error = %detail, "request failed with an unexpected error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR)
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the per-field messages, if any.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&FieldViolations> {
        self.validation_errors.as_ref()
    }

    /// Builds the JSON body for a request path at a point in time.
    #[must_use]
    pub fn to_body(&self, path: &str, timestamp: DateTime<Utc>) -> ErrorBody {
        ErrorBody {
            timestamp,
            status: self.status.as_u16(),
            error: self.message.clone(),
            path: path.to_owned(),
            validation_errors: self.validation_errors.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::TaskNotFound(_) | TaskServiceError::ProjectNotFound(_) => {
                Self::not_found(err.to_string())
            }
            TaskServiceError::Validation(violations) => Self::validation(violations),
            TaskServiceError::Repository(_) | TaskServiceError::ProjectRepository(_) => {
                Self::internal(&err)
            }
        }
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::NotFound(_) => Self::not_found(err.to_string()),
            ProjectServiceError::DuplicateName(_) => Self::conflict(err.to_string()),
            ProjectServiceError::Validation(violations) => Self::validation(violations),
            ProjectServiceError::Repository(_) => Self::internal(&err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Middleware writing the JSON body for responses produced from [`ApiError`].
pub async fn render_error_body(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;
    let Some(error) = response.extensions_mut().remove::<ApiError>() else {
        return response;
    };
    let body = error.to_body(&path, state.clock().utc());
    (error.status(), Json(body)).into_response()
}
