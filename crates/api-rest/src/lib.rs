//! # API REST
//!
//! REST API implementation for the symptom triage service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON error bodies, CORS, per-request tracing spans)
//!
//! Uses `api-shared` for wire types and `triage-core` for the pipeline itself.

#![warn(rust_2018_idioms)]

mod error;

pub use error::ApiError;

use std::sync::Arc;

use api_shared::{wire, AnalyzeRes, ErrorBody, ErrorDetail, HealthRes, HealthService};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use triage_core::TriagePipeline;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers
///
/// Holds the pipeline built once at startup. The pipeline is read-only, so every request
/// shares the same instance.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<TriagePipeline>,
    health: HealthService,
}

impl AppState {
    pub fn new(pipeline: TriagePipeline) -> Self {
        let health = HealthService::new(pipeline.guidance_mode());
        Self {
            pipeline: Arc::new(pipeline),
            health,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze),
    components(schemas(
        HealthRes,
        AnalyzeRes,
        ErrorBody,
        ErrorDetail,
        wire::Intake,
        wire::Vitals,
        wire::NormalizedSymptom,
        wire::Triage,
        wire::SourceTopic,
        wire::GuidancePayload,
    ))
)]
pub struct ApiDoc;

/// Build the REST router: `/health`, `/analyze` and the Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns liveness and the guidance mode the process started in.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(state.health.check_health())
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = wire::Intake,
    responses(
        (status = 200, description = "Triage analysis", body = AnalyzeRes),
        (status = 422, description = "Invalid intake", body = ErrorBody),
        (status = 502, description = "Guidance service failed or returned malformed output", body = ErrorBody),
        (status = 504, description = "Guidance service timed out", body = ErrorBody)
    )
)]
/// Analyse one symptom intake
///
/// Validates the intake, runs the triage pipeline and returns the full analysis.
///
/// # Errors
/// - `422` if the body is not a valid intake (malformed JSON, missing fields, age, sex, empty
///   symptoms, bad vitals).
/// - `502`/`504` if model-assisted guidance fails. There is no fallback after a model failure.
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<wire::Intake>, JsonRejection>,
) -> Result<Json<AnalyzeRes>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id);

    async move {
        let Json(req) = payload?;
        let intake = triage_core::Intake::try_from(req)?;
        let analysis = state.pipeline.analyze(intake).await?;
        Ok(Json(AnalyzeRes::from(analysis)))
    }
    .instrument(span)
    .await
}
