//! Interactive API documentation.
//!
//! The OpenAPI document is derived from the handler annotations and the
//! `ToSchema` types, and served next to a Swagger UI page that renders it.
//! The router mounts these routes only in development mode.

use axum::{response::Html, Json};
use utoipa::OpenApi;

use super::dto::{HealthResponse, ValidationProblem};
use super::error::ApiError;
use super::handlers;
use crate::models::{Person, PersonId, PersonPayload};
use crate::validation::ValidationErrors;

/// Path of the Swagger UI page.
pub const DOCS_PATH: &str = "/swagger";

/// Path of the OpenAPI document.
pub const SPEC_PATH: &str = "/swagger/v1/swagger.json";

const SWAGGER_UI_VERSION: &str = "5.18.2";

const API_TITLE: &str = "API de Personas";

#[derive(OpenApi)]
#[openapi(
    info(title = "API de Personas", description = "CRUD service for person records"),
    paths(
        handlers::root,
        handlers::health_check,
        handlers::list_persons,
        handlers::get_person,
        handlers::create_person,
        handlers::update_person,
        handlers::delete_person,
    ),
    components(schemas(
        Person,
        PersonId,
        PersonPayload,
        ValidationProblem,
        ValidationErrors,
        HealthResponse,
        ApiError,
    )),
    tags((name = "personas", description = "Person records"))
)]
pub struct ApiDoc;

/// GET /swagger
pub async fn swagger_ui() -> Html<String> {
    Html(swagger_html(API_TITLE, SPEC_PATH))
}

/// GET /swagger/v1/swagger.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// HTML page loading Swagger UI from a CDN and pointing it at `spec_url`.
pub fn swagger_html(title: &str, spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Swagger UI</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: "{spec_url}",
                dom_id: '#swagger-ui',
                deepLinking: true,
                docExpansion: 'list'
            }});
        }};
    </script>
</body>
</html>"##,
        title = html_escape(title),
        version = SWAGGER_UI_VERSION,
        spec_url = html_escape(spec_url),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
