use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLearnerRepository};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sentilearn::config::AppConfig;
use sentilearn::error::AppError;
use sentilearn::learning::{LearningConfig, LearningService};
use sentilearn::sentiment::SentimentAnalyzer;
use sentilearn::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        ping_message: Arc::from(config.api.ping_message.as_str()),
    };

    let analyzer = Arc::new(SentimentAnalyzer::new()?);
    let repository = Arc::new(InMemoryLearnerRepository::default());
    let learning_service = Arc::new(LearningService::new(repository, LearningConfig::default()));

    let app = with_application_routes(learning_service, analyzer)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "sentilearn service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
