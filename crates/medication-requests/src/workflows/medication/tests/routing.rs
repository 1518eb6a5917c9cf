use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::medication::{medication_request_router, MedicationRequestService};

fn process_request(id: u64) -> Request<Body> {
    Request::post(format!("/api/v1/medication-requests/{id}/process"))
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn process_route_returns_result_on_success() {
    let (service, _, email) = build_service(vec![request(10, 5)]);
    let router = medication_request_router(Arc::new(service));

    let response = router
        .oneshot(process_request(1))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["medicationName"], "Aspirin");
    assert!(payload["message"]
        .as_str()
        .expect("message string")
        .contains("successfully processed"));
    assert_eq!(email.sent().len(), 1);
}

#[tokio::test]
async fn process_route_returns_not_found_for_missing_request() {
    let (service, _, email) = build_service(Vec::new());
    let router = medication_request_router(Arc::new(service));

    let response = router
        .oneshot(process_request(42))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["kind"], "not_found");
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn process_route_distinguishes_stock_failures() {
    let mut insufficient = request(3, 5);
    insufficient.id = crate::workflows::medication::MedicationRequestId(2);
    let (service, _, email) = build_service(vec![request(0, 5), insufficient]);
    let router = medication_request_router(Arc::new(service));

    let out_of_stock = router
        .clone()
        .oneshot(process_request(1))
        .await
        .expect("route executes");
    assert_eq!(out_of_stock.status(), StatusCode::CONFLICT);
    assert_eq!(read_json_body(out_of_stock).await["kind"], "out_of_stock");

    let short = router
        .oneshot(process_request(2))
        .await
        .expect("route executes");
    assert_eq!(short.status(), StatusCode::CONFLICT);
    assert_eq!(read_json_body(short).await["kind"], "insufficient_stock");

    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn process_route_maps_collaborator_failures() {
    let service = MedicationRequestService::new(
        Arc::new(UnavailableRepository),
        Arc::new(RecordingEmailSender::default()),
    );
    let response = medication_request_router(Arc::new(service))
        .oneshot(process_request(1))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let repository = Arc::new(MemoryRepository::with_records(vec![request(10, 5)]));
    let service = MedicationRequestService::new(repository, Arc::new(BouncingEmailSender));
    let response = medication_request_router(Arc::new(service))
        .oneshot(process_request(1))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(read_json_body(response).await["kind"], "email");
}

#[tokio::test]
async fn process_route_rejects_non_numeric_ids() {
    let (service, repository, _) = build_service(Vec::new());
    let response = medication_request_router(Arc::new(service))
        .oneshot(
            Request::post("/api/v1/medication-requests/abc/process")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repository.lookups(), 0);
}

#[tokio::test]
async fn process_route_reports_shortfall_details_in_error_body() {
    let (service, _, _) = build_service(vec![request(3, 5)]);

    let response = medication_request_router(Arc::new(service))
        .oneshot(process_request(1))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert_eq!(payload["kind"], "insufficient_stock");
    assert_eq!(
        payload["error"],
        "insufficient stock for Aspirin: 3 available, 5 requested"
    );
}
