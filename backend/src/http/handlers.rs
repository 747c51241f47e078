//! HTTP handlers for the REST API.
//!
//! Mutating handlers validate the payload first and only then touch the
//! repository, so a rejected request never changes the store.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

use super::dto::{HealthResponse, Person, PersonPayload, ValidationProblem, GREETING};
use super::error::{ApiError, AppError};
use super::state::AppState;
use crate::models::PersonId;
use crate::validation;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

type IdPath = Result<Path<i64>, PathRejection>;
type PayloadBody = Result<Json<PersonPayload>, JsonRejection>;

/// Location of a person resource.
pub fn person_location(id: PersonId) -> String {
    format!("/persona/{}", id)
}

fn check_payload(payload: &PersonPayload) -> Result<(), AppError> {
    let errors = validation::validate(payload);
    if errors.is_empty() {
        Ok(())
    } else {
        warn!(fields = ?errors.fields().collect::<Vec<_>>(), "validation failed");
        Err(AppError::Validation(errors))
    }
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "personas",
    responses((status = 200, description = "Service greeting", body = String, content_type = "text/plain"))
)]
pub async fn root() -> &'static str {
    GREETING
}

/// GET /health
///
/// Liveness check reporting the number of stored records.
#[utoipa::path(
    get,
    path = "/health",
    tag = "personas",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let persons = state.repository.count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        persons,
    }))
}

/// GET /listar_personas
///
/// List every person in insertion order.
#[utoipa::path(
    get,
    path = "/listar_personas",
    tag = "personas",
    responses((status = 200, description = "All persons in insertion order", body = [Person]))
)]
pub async fn list_persons(State(state): State<AppState>) -> HandlerResult<Vec<Person>> {
    let persons = state.repository.list_persons().await?;
    Ok(Json(persons))
}

/// GET /persona/{id}
#[utoipa::path(
    get,
    path = "/persona/{id}",
    tag = "personas",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "The person", body = Person),
        (status = 400, description = "Id is not an integer", body = ApiError),
        (status = 404, description = "No person with that id")
    )
)]
pub async fn get_person(State(state): State<AppState>, id: IdPath) -> HandlerResult<Person> {
    let Path(id) = id?;
    let person = state.repository.get_person(PersonId::new(id)).await?;
    Ok(Json(person))
}

/// POST /registrar_persona
///
/// Validate, check document uniqueness and store. Answers 201 with the stored
/// record and a `Location` header.
#[utoipa::path(
    post,
    path = "/registrar_persona",
    tag = "personas",
    request_body = PersonPayload,
    responses(
        (status = 201, description = "The stored person", body = Person,
            headers(("Location" = String, description = "Path of the new record"))),
        (status = 200, description = "Document number already registered (409 when duplicate_conflict is enabled)",
            body = String, content_type = "text/plain"),
        (status = 400, description = "One or more fields failed validation",
            body = ValidationProblem, content_type = "application/problem+json")
    )
)]
pub async fn create_person(
    State(state): State<AppState>,
    payload: PayloadBody,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    check_payload(&payload)?;

    let person = state
        .repository
        .insert_person(payload)
        .await
        .map_err(|e| AppError::from_repository(e, state.duplicate_conflict))?;
    info!(person_id = %person.id, "registered person");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, person_location(person.id))],
        Json(person),
    ))
}

/// PUT /editar_persona/{id}
///
/// Existence is checked before validation, so an unknown id is a 404 even
/// when the body is invalid.
#[utoipa::path(
    put,
    path = "/editar_persona/{id}",
    tag = "personas",
    params(("id" = i64, Path, description = "Person id")),
    request_body = PersonPayload,
    responses(
        (status = 204, description = "Updated"),
        (status = 200, description = "Document number already registered (409 when duplicate_conflict is enabled)",
            body = String, content_type = "text/plain"),
        (status = 400, description = "One or more fields failed validation",
            body = ValidationProblem, content_type = "application/problem+json"),
        (status = 404, description = "No person with that id")
    )
)]
pub async fn update_person(
    State(state): State<AppState>,
    id: IdPath,
    payload: PayloadBody,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let id = PersonId::new(id);
    state.repository.get_person(id).await?;

    let Json(payload) = payload?;
    check_payload(&payload)?;

    state
        .repository
        .update_person(id, payload)
        .await
        .map_err(|e| AppError::from_repository(e, state.duplicate_conflict))?;
    info!(person_id = %id, "edited person");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /eliminar_persona/{id}
///
/// Answers with the record that was removed.
#[utoipa::path(
    delete,
    path = "/eliminar_persona/{id}",
    tag = "personas",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "The deleted person", body = Person),
        (status = 404, description = "No person with that id")
    )
)]
pub async fn delete_person(State(state): State<AppState>, id: IdPath) -> HandlerResult<Person> {
    let Path(id) = id?;
    let person = state.repository.delete_person(PersonId::new(id)).await?;
    info!(person_id = %person.id, "deleted person");
    Ok(Json(person))
}
