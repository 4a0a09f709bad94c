//! # API REST
//!
//! REST API for the symptom checker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `symptom-core` for the inference logic.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    HealthRes, HealthService, PredictRes, PredictionItem, RelatedSymptomsRes, SymptomListRes,
    SymptomsReq,
};
use symptom_core::DiagnosisService;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: DiagnosisService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_symptoms, predict, related_symptoms),
    components(schemas(
        HealthRes,
        SymptomsReq,
        PredictRes,
        PredictionItem,
        RelatedSymptomsRes,
        SymptomListRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router around a loaded (or degraded) service.
pub fn router(service: DiagnosisService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/symptoms", get(list_symptoms))
        .route("/api/predict", post(predict))
        .route("/api/related_symptoms", post(related_symptoms))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
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
/// Reports `ok: false` with the load failure when the service is degraded.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(&state.service))
}

#[utoipa::path(
    get,
    path = "/api/symptoms",
    responses(
        (status = 200, description = "Recognised symptoms in feature order", body = SymptomListRes)
    )
)]
#[axum::debug_handler]
async fn list_symptoms(State(state): State<AppState>) -> Json<SymptomListRes> {
    Json(SymptomListRes {
        symptoms: state.service.vocabulary().to_vec(),
    })
}

#[utoipa::path(
    post,
    path = "/api/predict",
    request_body = SymptomsReq,
    responses(
        (status = 200, description = "Ranked predictions, or an advisory error message", body = PredictRes),
        (status = 500, description = "Inference failed", body = PredictRes)
    )
)]
/// Predict likely diseases from the selected symptoms
///
/// Too few symptoms and an unavailable model are advisories: they are returned as
/// `{"error": ...}` with status 200. A failing classifier is a server error.
///
/// # Errors
/// Returns `500 Internal Server Error` if:
/// - the classifier rejects the encoded input.
#[axum::debug_handler]
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<SymptomsReq>,
) -> Result<Json<PredictRes>, (StatusCode, Json<PredictRes>)> {
    match state.service.predict(&req.symptoms) {
        Ok(predictions) => Ok(Json(PredictRes::predictions(predictions))),
        Err(e) if e.is_advisory() => {
            tracing::debug!("Predict advisory: {}", e);
            Ok(Json(PredictRes::from(&e)))
        }
        Err(e) => {
            tracing::error!("Predict error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(PredictRes::from(&e))))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/related_symptoms",
    request_body = SymptomsReq,
    responses(
        (status = 200, description = "Up to five symptoms that co-occur with the selection", body = RelatedSymptomsRes)
    )
)]
#[axum::debug_handler]
async fn related_symptoms(
    State(state): State<AppState>,
    Json(req): Json<SymptomsReq>,
) -> Json<RelatedSymptomsRes> {
    Json(RelatedSymptomsRes {
        related: state.service.related_symptoms(&req.symptoms),
    })
}
