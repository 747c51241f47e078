//! HTTP error handling and response types.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use super::dto::{ValidationProblem, DUPLICATE_DOCUMENT_MESSAGE};
use crate::db::RepositoryError;
use crate::validation::ValidationErrors;

/// Error body for requests whose path or JSON body could not be parsed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found; answered with an empty 404
    NotFound,
    /// One or more field rules failed
    Validation(ValidationErrors),
    /// Document number already taken. `conflict` selects 409 over 200.
    DuplicateDocument { conflict: bool },
    /// Malformed request (unparseable body or path)
    BadRequest(String),
}

impl AppError {
    /// Map a repository error, choosing the duplicate-document status.
    pub fn from_repository(err: RepositoryError, duplicate_conflict: bool) -> Self {
        match err {
            RepositoryError::DuplicateDocument { .. } => Self::DuplicateDocument {
                conflict: duplicate_conflict,
            },
            other => other.into(),
        }
    }
}

fn duplicate_response(conflict: bool) -> Response {
    let status = if conflict {
        StatusCode::CONFLICT
    } else {
        StatusCode::OK
    };
    (status, DUPLICATE_DOCUMENT_MESSAGE).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/problem+json")],
                Json(ValidationProblem::new(errors)),
            )
                .into_response(),
            AppError::DuplicateDocument { conflict } => duplicate_response(conflict),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("BAD_REQUEST", msg)),
            )
                .into_response(),
        }
    }
}

/// Without a duplicate-status flag at hand, a duplicate maps to the default 200.
impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => AppError::NotFound,
            RepositoryError::DuplicateDocument { .. } => AppError::DuplicateDocument { conflict: false },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "rejected request body");
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
