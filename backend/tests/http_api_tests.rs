//! End-to-end tests of the HTTP API, driven through the router with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use personas_api::db::{LocalRepository, PersonRepository};
use personas_api::http::{build_router, create_router, AppState};

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("response body is UTF-8")
    }
}

fn test_app() -> (Router, Arc<LocalRepository>) {
    let repo = Arc::new(LocalRepository::new());
    let state = AppState::new(Arc::clone(&repo) as Arc<dyn PersonRepository>);
    (create_router(state), repo)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

fn person_json(document: &str) -> Value {
    json!({
        "fullName": "Carla Benítez",
        "documentNumber": document,
        "email": "carla.benitez@example.com",
        "phone": "+34 600 000 000",
        "birthDate": "1992-07-21"
    })
}

async fn register(app: &Router, document: &str) -> Value {
    let response = send(app, Method::POST, "/registrar_persona", Some(person_json(document))).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_root_greeting() {
    let (app, _) = test_app();
    let response = send(&app, Method::GET, "/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "API de Personas");
}

#[tokio::test]
async fn test_create_then_fetch_returns_same_fields() {
    let (app, _) = test_app();

    let response = send(&app, Method::POST, "/registrar_persona", Some(person_json("X-100"))).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let created = response.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(
        response.headers.get(header::LOCATION).unwrap(),
        format!("/persona/{}", id).as_str()
    );

    let fetched = send(&app, Method::GET, &format!("/persona/{}", id), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created);
    assert_eq!(created["documentNumber"], "X-100");
    assert_eq!(created["birthDate"], "1992-07-21");
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let (app, _) = test_app();
    let mut seen = std::collections::HashSet::new();

    for doc in ["D1", "D2", "D3", "D4"] {
        let created = register(&app, doc).await;
        assert!(seen.insert(created["id"].as_i64().unwrap()));
    }
}

#[tokio::test]
async fn test_body_id_is_ignored() {
    let (app, _) = test_app();
    let mut body = person_json("IGN-1");
    body["id"] = json!(500);

    let created = send(&app, Method::POST, "/registrar_persona", Some(body)).await.json();
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn test_duplicate_document_differing_in_case() {
    let (app, repo) = test_app();
    register(&app, "abc123").await;

    let response = send(&app, Method::POST, "/registrar_persona", Some(person_json("ABC123"))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ERROR: document number cannot be duplicated");
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_document_conflict_mode() {
    let repo = Arc::new(LocalRepository::new());
    let mut state = AppState::new(repo as Arc<dyn PersonRepository>);
    state.duplicate_conflict = true;
    let app = create_router(state);

    register(&app, "dup").await;
    let response = send(&app, Method::POST, "/registrar_persona", Some(person_json("DUP"))).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.text(), "ERROR: document number cannot be duplicated");
}

#[tokio::test]
async fn test_empty_email_is_validation_problem() {
    let (app, repo) = test_app();
    let mut body = person_json("E-1");
    body["email"] = json!("");

    let response = send(&app, Method::POST, "/registrar_persona", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );

    let problem = response.json();
    assert_eq!(problem["status"], 400);
    let messages = problem["errors"]["email"].as_array().unwrap();
    assert!(messages.iter().any(|m| m == "must complete the email field"));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_future_birth_date_is_rejected() {
    let (app, _) = test_app();
    let mut body = person_json("F-1");
    body["birthDate"] = json!("2999-12-31");

    let response = send(&app, Method::POST, "/registrar_persona", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["errors"]["birthDate"],
        json!(["birth date must be earlier than the current date"])
    );
}

#[tokio::test]
async fn test_missing_fields_collect_every_error() {
    let (app, _) = test_app();

    let response = send(&app, Method::POST, "/registrar_persona", Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let errors = response.json()["errors"].clone();
    assert_eq!(
        errors["documentNumber"],
        json!(["must complete the document number field"])
    );
    assert_eq!(errors["birthDate"], json!(["must complete the birth date field"]));
    assert_eq!(errors["email"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/registrar_persona")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_missing_id_is_not_found() {
    let (app, repo) = test_app();
    register(&app, "keep").await;

    let response = send(&app, Method::PUT, "/editar_persona/42", Some(person_json("new"))).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_edit_missing_id_wins_over_invalid_body() {
    let (app, _) = test_app();

    let response = send(&app, Method::PUT, "/editar_persona/7", Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_phone_only() {
    let (app, _) = test_app();
    let created = register(&app, "PH-1").await;
    let id = created["id"].as_i64().unwrap();

    let mut body = person_json("PH-1");
    body["phone"] = json!("+34 611 222 333");
    let response = send(&app, Method::PUT, &format!("/editar_persona/{}", id), Some(body)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    let fetched = send(&app, Method::GET, &format!("/persona/{}", id), None).await.json();
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["phone"], "+34 611 222 333");
    assert_eq!(fetched["email"], created["email"]);
}

#[tokio::test]
async fn test_edit_to_taken_document_is_rejected() {
    let (app, _) = test_app();
    register(&app, "first").await;
    let second = register(&app, "second").await;
    let id = second["id"].as_i64().unwrap();

    let response = send(
        &app,
        Method::PUT,
        &format!("/editar_persona/{}", id),
        Some(person_json("FIRST")),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ERROR: document number cannot be duplicated");

    let fetched = send(&app, Method::GET, &format!("/persona/{}", id), None).await.json();
    assert_eq!(fetched["documentNumber"], "second");
}

#[tokio::test]
async fn test_edit_invalid_body_leaves_record() {
    let (app, _) = test_app();
    let created = register(&app, "V-1").await;
    let id = created["id"].as_i64().unwrap();

    let mut body = person_json("V-1");
    body["email"] = json!("not-an-email");
    let response = send(&app, Method::PUT, &format!("/editar_persona/{}", id), Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let fetched = send(&app, Method::GET, &format!("/persona/{}", id), None).await.json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_delete_then_fetch_is_not_found() {
    let (app, _) = test_app();
    let created = register(&app, "DEL-1").await;
    let uri = format!("/eliminar_persona/{}", created["id"]);

    let deleted = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json(), created);

    let fetched = send(&app, Method::GET, &format!("/persona/{}", created["id"]), None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let (app, _) = test_app();
    let response = send(&app, Method::DELETE, "/eliminar_persona/3", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_in_insertion_order() {
    let (app, _) = test_app();
    let empty = send(&app, Method::GET, "/listar_personas", None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.json(), json!([]));

    for doc in ["L3", "L1", "L2"] {
        register(&app, doc).await;
    }

    let listed = send(&app, Method::GET, "/listar_personas", None).await.json();
    let docs: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["documentNumber"].as_str().unwrap())
        .collect();
    assert_eq!(docs, vec!["L3", "L1", "L2"]);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (app, _) = test_app();
    let response = send(&app, Method::GET, "/persona/abc", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_health_reports_count() {
    let (app, _) = test_app();
    register(&app, "H-1").await;

    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
    assert_eq!(response.json()["persons"], 1);
}

#[tokio::test]
async fn test_docs_only_when_enabled() {
    let (app, _) = test_app();
    let hidden = send(&app, Method::GET, "/swagger", None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let repo = Arc::new(LocalRepository::new()) as Arc<dyn PersonRepository>;
    let app = build_router(AppState::new(repo), true);

    let page = send(&app, Method::GET, "/swagger", None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.text().contains("swagger-ui"));

    let spec = send(&app, Method::GET, "/swagger/v1/swagger.json", None).await;
    assert_eq!(spec.status, StatusCode::OK);
    assert!(spec.json()["paths"]["/registrar_persona"]["post"].is_object());
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_store_once() {
    let (app, repo) = test_app();

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            let doc = if i % 2 == 0 { "race" } else { "RACE" };
            tokio::spawn(async move {
                send(&app, Method::POST, "/registrar_persona", Some(person_json(doc)))
                    .await
                    .status
            })
        })
        .collect();

    let mut created = 0;
    for task in tasks {
        if task.await.unwrap() == StatusCode::CREATED {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}
