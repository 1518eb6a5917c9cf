use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryMedicationRequestRepository, LoggingEmailSender};
use crate::routes::with_medication_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use medication_requests::config::AppConfig;
use medication_requests::error::AppError;
use medication_requests::telemetry;
use medication_requests::workflows::medication::MedicationRequestService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryMedicationRequestRepository::default());
    if !args.no_seed {
        let seeded = repository.seed_demo();
        info!(count = seeded.len(), "seeded demo medication requests");
    }
    let email = Arc::new(LoggingEmailSender::new(&config.notifications));
    let service = Arc::new(MedicationRequestService::new(repository.clone(), email));

    let app = with_medication_routes(service, repository)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "medication request service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
