use crate::infra::{AppState, InMemoryMedicationRequestRepository};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use medication_requests::workflows::medication::{
    medication_request_router, EmailSender, MedicationRequest, MedicationRequestRepository,
    MedicationRequestService, NewMedicationRequest,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub(crate) fn with_medication_routes<R, E>(
    service: Arc<MedicationRequestService<R, E>>,
    store: Arc<InMemoryMedicationRequestRepository>,
) -> Router
where
    R: MedicationRequestRepository + 'static,
    E: EmailSender + 'static,
{
    let intake = Router::new()
        .route("/api/v1/medication-requests", post(create_request_endpoint))
        .with_state(store);

    medication_request_router(service)
        .merge(intake)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn create_request_endpoint(
    State(store): State<Arc<InMemoryMedicationRequestRepository>>,
    Json(payload): Json<NewMedicationRequest>,
) -> (StatusCode, Json<MedicationRequest>) {
    let record = store.insert(payload);
    info!(id = %record.id, medication = %record.medication.name, "medication request stored");
    (StatusCode::CREATED, Json(record))
}
