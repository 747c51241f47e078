//! Data Transfer Objects for the HTTP API.
//!
//! Person records and payloads are serialized directly; this module holds the
//! response shapes that exist only at the HTTP boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::models::{Person, PersonPayload};
use crate::validation::ValidationErrors;

/// Greeting returned by `GET /`.
pub const GREETING: &str = "API de Personas";

/// Plain-text body returned when a document number is already taken.
pub const DUPLICATE_DOCUMENT_MESSAGE: &str = "ERROR: document number cannot be duplicated";

/// RFC 9110 reference used as the problem type of validation failures.
pub const VALIDATION_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.1";

pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred.";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of live person records
    pub persons: usize,
}

/// Problem details body for a failed validation (`application/problem+json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationProblem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    /// Field name to the list of messages for that field
    pub errors: ValidationErrors,
}

impl ValidationProblem {
    pub fn new(errors: ValidationErrors) -> Self {
        Self {
            problem_type: VALIDATION_PROBLEM_TYPE.to_string(),
            title: VALIDATION_PROBLEM_TITLE.to_string(),
            status: 400,
            errors,
        }
    }
}
