use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};
use vaccination_dashboard::config::AppConfig;
use vaccination_dashboard::dashboard::load_context;
use vaccination_dashboard::error::AppError;
use vaccination_dashboard::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let context = load_context(&config.data, config.map.clone()).map_err(|err| {
        error!(%err, "static resources unavailable, aborting startup");
        AppError::from(err)
    })?;
    let info = context.info();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_dashboard_routes(Arc::new(context))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        vaccinations = info.vaccination_records,
        last_year = ?info.last_year,
        "vaccination dashboard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
