use crate::cli::ServeArgs;
use crate::infra::{load_dataset, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use civic_ledger::config::AppConfig;
use civic_ledger::error::AppError;
use civic_ledger::telemetry;
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
    config.data = args.data.merged_with(&config.data);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dataset = Arc::new(load_dataset(&config.data)?);
    info!(
        leaders = dataset.leaders.len(),
        projects = dataset.projects.len(),
        sample = config.data.dataset_path.is_none(),
        "dataset loaded"
    );

    let app = with_operational_routes(dataset)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "civic ledger api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
