//! # API REST
//!
//! REST API implementation for AuraHealth.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! The router is built by [`app`] over a [`PatientService`], so the server
//! binary and the integration tests drive the same application. Routes and
//! response shapes are part of the deployed contract and must stay stable;
//! clients match on the exact `message` and `detail` strings.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod error;

use crate::error::ApiError;
use aura_core::{PatientService, SortDirection, SortField};
use axum::{
    extract::{Path as AxumPath, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request handlers,
/// including the PatientService instance for data operations.
#[derive(Clone)]
struct AppState {
    service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        view,
        view_patient,
        sort_patients,
        create_patient,
        update_patient,
        delete_patient,
    ),
    components(schemas(
        dto::MessageRes,
        dto::PatientRes,
        dto::ViewRes,
        dto::ListRes,
        dto::CreatePatientReq,
        dto::CreatePatientRes,
        dto::UpdatePatientReq,
        dto::DetailRes,
    ))
)]
struct ApiDoc;

/// Builds the REST application router.
///
/// # Arguments
///
/// * `service` - The shared patient service all handlers operate on.
///
/// # Returns
///
/// An axum `Router` with all patient routes, Swagger UI under `/swagger-ui`
/// and a permissive CORS layer.
pub fn app(service: PatientService) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(root))
        .route("/view", get(view))
        .route("/patient/:id", get(view_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit/:id", put(update_patient))
        .route("/delete/:id", delete(delete_patient))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = dto::MessageRes)
    )
)]
/// Service banner endpoint
///
/// Names the service. Doubles as a basic liveness probe for monitoring.
#[axum::debug_handler]
async fn root(State(_state): State<AppState>) -> Json<dto::MessageRes> {
    Json(dto::MessageRes {
        message: "Patient Management System".into(),
    })
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "All patient records keyed by id", body = dto::ViewRes)
    )
)]
/// View all patient records
///
/// Returns the full id → record mapping with derived fields populated.
///
/// # Returns
/// * `Json<dto::ViewRes>` - Every stored record under its id.
#[axum::debug_handler]
async fn view(State(state): State<AppState>) -> Json<dto::ViewRes> {
    let data = state
        .service
        .list_patients()
        .iter()
        .map(|patient| (patient.id.clone(), dto::PatientRes::from(patient)))
        .collect();
    Json(dto::ViewRes { data })
}

#[utoipa::path(
    get,
    path = "/patient/{id}",
    responses(
        (status = 200, description = "The patient record", body = dto::PatientRes),
        (status = 404, description = "Patient not found", body = dto::DetailRes)
    )
)]
/// View a single patient record
///
/// # Errors
/// Returns `404 Not Found` if no record has the given id.
#[axum::debug_handler]
async fn view_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<dto::PatientRes>, ApiError> {
    let patient = state.service.get_patient(&id)?;
    Ok(Json(dto::PatientRes::from(&patient)))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(dto::SortQuery),
    responses(
        (status = 200, description = "Records ordered by the requested field", body = dto::ListRes),
        (status = 400, description = "Unknown sort field or order", body = dto::DetailRes)
    )
)]
/// Sorted patient listing
///
/// The sortable fields at this endpoint are limited to the measures
/// `height`, `weight` and `bmi`; clients depend on the exact error strings
/// for anything else. Ties keep their stored order in both directions.
///
/// # Errors
/// Returns `400 Bad Request` if `sort_by` is not one of the three fields or
/// `order` is not `asc`/`desc`.
#[axum::debug_handler]
async fn sort_patients(
    State(state): State<AppState>,
    Query(query): Query<dto::SortQuery>,
) -> Result<Json<dto::ListRes>, ApiError> {
    let field = match query.sort_by.as_str() {
        "height" => SortField::Height,
        "weight" => SortField::Weight,
        "bmi" => SortField::Bmi,
        _ => {
            return Err(ApiError::bad_request(
                "Invalid field. Choose from ['height', 'weight', 'bmi']",
            ))
        }
    };
    let direction = match query.order.as_str() {
        "asc" => SortDirection::Ascending,
        "desc" => SortDirection::Descending,
        _ => return Err(ApiError::bad_request("Order must be 'asc' or 'desc'")),
    };

    let data = state
        .service
        .sort_patients(field, direction)
        .iter()
        .map(dto::PatientRes::from)
        .collect();
    Ok(Json(dto::ListRes { data }))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = dto::CreatePatientReq,
    responses(
        (status = 200, description = "Patient created", body = dto::CreatePatientRes),
        (status = 400, description = "A patient with this id already exists", body = dto::DetailRes),
        (status = 422, description = "A field failed validation", body = dto::DetailRes)
    )
)]
/// Create a new patient record
///
/// Validates the supplied fields, computes `bmi` and `verdict`, stores the
/// record and writes the snapshot file.
///
/// # Arguments
/// * `req` - Request body carrying the id and the six patient fields.
///
/// # Returns
/// * `Ok(Json<dto::CreatePatientRes>)` - Confirmation message plus the
///   stored record with derived fields.
///
/// # Errors
/// Returns `400 Bad Request` if the id already exists, or
/// `422 Unprocessable Entity` naming the first invalid field.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<dto::CreatePatientReq>,
) -> Result<Json<dto::CreatePatientRes>, ApiError> {
    let patient = state.service.create_patient(req.into_draft())?;
    Ok(Json(dto::CreatePatientRes {
        message: "Patient created successfully".into(),
        patient: dto::PatientRes::from(&patient),
    }))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    request_body = dto::UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = dto::MessageRes),
        (status = 404, description = "Patient not found", body = dto::DetailRes),
        (status = 422, description = "A field failed validation", body = dto::DetailRes)
    )
)]
/// Replace a patient record
///
/// The full field set is required; the stored record is replaced wholesale
/// and `bmi`/`verdict` recomputed. The id in the path names the record; an
/// `id` inside the body is ignored.
///
/// # Errors
/// Returns `404 Not Found` for an unknown id, or `422 Unprocessable Entity`
/// naming the first invalid field.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<dto::UpdatePatientReq>,
) -> Result<Json<dto::MessageRes>, ApiError> {
    state.service.update_patient(&id, req.into_draft(&id))?;
    Ok(Json(dto::MessageRes {
        message: "Patient updated successfully".into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    responses(
        (status = 200, description = "Patient deleted", body = dto::MessageRes),
        (status = 404, description = "Patient not found", body = dto::DetailRes)
    )
)]
/// Delete a patient record
///
/// Removes the record and writes the snapshot file. Deleting the same id
/// again returns `404 Not Found`.
///
/// # Errors
/// Returns `404 Not Found` if no record has the given id.
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<dto::MessageRes>, ApiError> {
    state.service.delete_patient(&id)?;
    Ok(Json(dto::MessageRes {
        message: "Patient deleted successfully".into(),
    }))
}
