//! End-to-end tests driving the REST router in memory.
//!
//! Each test builds a fresh app over its own temporary snapshot file and
//! sends requests through `tower::ServiceExt::oneshot`, so the full
//! route → handler → service → store → snapshot path is exercised without a
//! network listener.

use std::sync::Arc;

use api_rest::app;
use aura_core::{CoreConfig, PatientService};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn test_app(dir: &TempDir) -> Router {
    let cfg = Arc::new(CoreConfig::new(dir.path().join("patients.json")).expect("config"));
    let service = PatientService::open(cfg).expect("open service");
    app(service)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn patient_body(id: &str, weight: f64) -> Value {
    json!({
        "id": id,
        "name": "Ana Jones",
        "city": "New York",
        "age": 30,
        "gender": "female",
        "height": 1.75,
        "weight": weight,
    })
}

#[tokio::test]
async fn test_root_returns_service_banner() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient Management System");
}

#[tokio::test]
async fn test_create_returns_record_with_derived_fields() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/create",
        Some(patient_body("P001", 70.0)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient created successfully");
    assert_eq!(body["patient"]["id"], "P001");
    assert_eq!(body["patient"]["bmi"], json!(22.86));
    assert_eq!(body["patient"]["verdict"], "normal");
}

#[tokio::test]
async fn test_create_duplicate_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    send(&app, Method::POST, "/create", Some(patient_body("P001", 70.0))).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/create",
        Some(patient_body("P001", 80.0)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Patient with this ID already exists");
}

#[tokio::test]
async fn test_create_invalid_field_names_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let mut body = patient_body("P001", 70.0);
    body["weight"] = json!(-5.0);
    let (status, body) = send(&app, Method::POST, "/create", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("weight"));
}

#[tokio::test]
async fn test_view_returns_id_keyed_map() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    send(&app, Method::POST, "/create", Some(patient_body("P001", 70.0))).await;
    send(&app, Method::POST, "/create", Some(patient_body("P002", 95.0))).await;

    let (status, body) = send(&app, Method::GET, "/view", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["P001"]["city"], "New York");
    assert_eq!(body["data"]["P002"]["weight"], json!(95.0));
}

#[tokio::test]
async fn test_view_patient_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::GET, "/patient/P404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient not found");
}

#[tokio::test]
async fn test_sort_orders_and_defaults_to_ascending() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    send(&app, Method::POST, "/create", Some(patient_body("P001", 90.0))).await;
    send(&app, Method::POST, "/create", Some(patient_body("P002", 60.0))).await;
    send(&app, Method::POST, "/create", Some(patient_body("P003", 75.0))).await;

    let (status, body) = send(&app, Method::GET, "/sort?sort_by=weight", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["P002", "P003", "P001"]);

    let (_, body) = send(&app, Method::GET, "/sort?sort_by=weight&order=desc", None).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["P001", "P003", "P002"]);
}

#[tokio::test]
async fn test_sort_rejects_field_outside_contract() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    // `age` is sortable in the core engine but not at this endpoint
    let (status, body) = send(&app, Method::GET, "/sort?sort_by=age", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Invalid field. Choose from ['height', 'weight', 'bmi']"
    );

    let (status, _) = send(&app, Method::GET, "/sort", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sort_rejects_unknown_order() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::GET, "/sort?sort_by=bmi&order=down", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Order must be 'asc' or 'desc'");
}

#[tokio::test]
async fn test_edit_replaces_record_and_recomputes() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    send(&app, Method::POST, "/create", Some(patient_body("P001", 70.0))).await;

    // the body carries a different id, which must be ignored
    let (status, body) = send(
        &app,
        Method::PUT,
        "/edit/P001",
        Some(patient_body("P999", 100.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient updated successfully");

    let (_, body) = send(&app, Method::GET, "/patient/P001", None).await;
    assert_eq!(body["bmi"], json!(32.65));
    assert_eq!(body["verdict"], "obese");

    let (status, _) = send(&app, Method::GET, "/patient/P999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_unknown_patient_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/edit/P404",
        Some(patient_body("P404", 70.0)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient not found");
}

#[tokio::test]
async fn test_delete_then_redelete() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    send(&app, Method::POST, "/create", Some(patient_body("P001", 70.0))).await;

    let (status, body) = send(&app, Method::DELETE, "/delete/P001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient deleted successfully");

    let (status, body) = send(&app, Method::DELETE, "/delete/P001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient not found");
}

#[tokio::test]
async fn test_mutations_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let app = test_app(&dir);
    send(&app, Method::POST, "/create", Some(patient_body("P001", 70.0))).await;
    drop(app);

    // a new app over the same data file serves the stored record
    let app = test_app(&dir);
    let (status, body) = send(&app, Method::GET, "/patient/P001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bmi"], json!(22.86));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].is_string());
}

#[tokio::test]
async fn test_swagger_ui_served() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    // bare path redirects to the index, trailing slash serves it
    let (status, _) = send(&app, Method::GET, "/swagger-ui", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _) = send(&app, Method::GET, "/swagger-ui/", None).await;
    assert_eq!(status, StatusCode::OK);
}
