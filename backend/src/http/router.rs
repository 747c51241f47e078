//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::docs;
use super::handlers;
use super::state::AppState;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the application router without the documentation routes.
pub fn create_router(state: AppState) -> Router {
    build_router(state, false)
}

/// Create the application router, mounting the Swagger UI when `with_docs` is set.
pub fn build_router(state: AppState, with_docs: bool) -> Router {
    // CORS configuration - permissive, the API carries no credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/listar_personas", get(handlers::list_persons))
        .route("/persona/{id}", get(handlers::get_person))
        .route("/registrar_persona", post(handlers::create_person))
        .route("/editar_persona/{id}", put(handlers::update_person))
        .route("/eliminar_persona/{id}", delete(handlers::delete_person));

    if with_docs {
        router = router
            .route(docs::DOCS_PATH, get(docs::swagger_ui))
            .route(docs::SPEC_PATH, get(docs::openapi_json));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
