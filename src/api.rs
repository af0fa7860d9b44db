//! HTTP surface for region lookups.
//!
//! `GET /?latitude=..&longitude=..` and form-encoded `POST /` both return a
//! JSON array of region names. Missing, unparseable or out-of-range
//! coordinates are rejected with 422 before the index is consulted.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Form, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::LookupError;
use crate::pip::PipService;

/// Build the application router around a loaded service
pub fn router(service: Arc<PipService>) -> Router {
    Router::new()
        .route("/", get(lookup_query_handler).post(lookup_form_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Client errors, always reported as 422 with a `detail` message
#[derive(Debug)]
pub enum ApiError {
    InvalidParams(String),
    Lookup(LookupError),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match self {
            ApiError::InvalidParams(msg) => msg,
            ApiError::Lookup(e) => e.to_string(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { detail })).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        ApiError::Lookup(e)
    }
}

/// Lookup via query parameters
async fn lookup_query_handler(
    State(service): State<Arc<PipService>>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidParams(e.body_text()))?;
    Ok(Json(service.lookup(params.latitude, params.longitude)?))
}

/// Lookup via form-encoded body
async fn lookup_form_handler(
    State(service): State<Arc<PipService>>,
    params: Result<Form<LookupParams>, FormRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Form(params) = params.map_err(|e| ApiError::InvalidParams(e.body_text()))?;
    Ok(Json(service.lookup(params.latitude, params.longitude)?))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    regions: usize,
}

/// Health check endpoint
async fn health_handler(State(service): State<Arc<PipService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        regions: service.index().len(),
    })
}
