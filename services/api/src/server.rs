use crate::cli::ServeArgs;
use crate::infra::{
    default_assessment_config, AppState, InMemoryNotificationPublisher, InMemoryRequestRepository,
};
use crate::routes::with_request_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use formsly::config::AppConfig;
use formsly::error::AppError;
use formsly::forms::requests::FormRequestService;
use formsly::telemetry;
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

    let repository = Arc::new(InMemoryRequestRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let request_service = Arc::new(FormRequestService::new(
        repository,
        notifications,
        default_assessment_config(),
    ));

    let app = with_request_routes(request_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    // Lone boolean with no dependent data; relaxed matches the load side.
    readiness_flag.store(true, Ordering::Relaxed);

    info!(?config.environment, %addr, "formsly request service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
