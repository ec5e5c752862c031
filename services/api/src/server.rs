use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use member_portal::api::PortalClient;
use member_portal::config::AppConfig;
use member_portal::error::AppError;
use member_portal::telemetry;
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
    if let Some(upstream) = args.upstream.take() {
        config.upstream.base_url = upstream;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let client = Arc::new(PortalClient::new(&config.upstream)?);

    let app = with_portal_routes(client, config.dashboard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        upstream = %config.upstream.base_url,
        "member portal api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
