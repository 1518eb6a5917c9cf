use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::error::AppError;

use super::domain::{MedicationRequestId, ProcessingResult};
use super::notification::EmailSender;
use super::repository::MedicationRequestRepository;
use super::service::{MedicationRequestError, MedicationRequestService};

/// Router builder exposing the processing endpoint.
pub fn medication_request_router<R, E>(service: Arc<MedicationRequestService<R, E>>) -> Router
where
    R: MedicationRequestRepository + 'static,
    E: EmailSender + 'static,
{
    Router::new()
        .route(
            "/api/v1/medication-requests/:request_id/process",
            post(process_handler::<R, E>),
        )
        .with_state(service)
}

impl MedicationRequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::OutOfStock { .. } | Self::InsufficientStock { .. } => StatusCode::CONFLICT,
            Self::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Email(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

pub(crate) async fn process_handler<R, E>(
    State(service): State<Arc<MedicationRequestService<R, E>>>,
    Path(request_id): Path<u64>,
) -> Result<Json<ProcessingResult>, AppError>
where
    R: MedicationRequestRepository + 'static,
    E: EmailSender + 'static,
{
    let id = MedicationRequestId(request_id);
    match service.process(id).await {
        Ok(result) => {
            info!(%id, medication = %result.medication_name, "medication request processed");
            Ok(Json(result))
        }
        Err(error) => {
            if error.status_code().is_server_error() {
                warn!(%id, kind = error.kind(), %error, "medication request processing failed");
            } else {
                info!(%id, kind = error.kind(), "medication request rejected");
            }
            Err(AppError::from(error))
        }
    }
}
