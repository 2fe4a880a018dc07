use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_operations_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use maid_priority::config::AppConfig;
use maid_priority::error::AppError;
use maid_priority::telemetry;
use maid_priority::workflows::distribution::CsvDirectoryWriter;
use maid_priority::workflows::operations::PriorityOperationsService;
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
    if let Some(output_dir) = args.output_dir.take() {
        config.output_dir = output_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sheets = Arc::new(CsvDirectoryWriter::new(config.output_dir.clone()));
    let service = Arc::new(PriorityOperationsService::from_config(sheets, &config));

    let app = with_operations_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        output_dir = %config.output_dir.display(),
        "housemaid priority service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
