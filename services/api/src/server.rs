use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_operational_routes;
use axum::http::{header, HeaderValue, Method};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use big_five::config::AppConfig;
use big_five::error::AppError;
use big_five::telemetry;
use big_five::workflows::assessment::{assessment_router, AssessmentBlueprint, AssessmentService};
use big_five::workflows::delivery::GoogleSheetsSink;
use big_five::workflows::roster::RosterImporter;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(roster) = args.roster.take() {
        config.roster.path = roster;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster = Arc::new(RosterImporter::load_or_empty(&config.roster.path));
    let sink = Arc::new(GoogleSheetsSink::connect(&config.sheets).await?);
    let assessment_service = Arc::new(AssessmentService::new(
        roster,
        Arc::new(AssessmentBlueprint::standard()),
        sink,
    ));

    let app = with_operational_routes(assessment_router(assessment_service))
        .layer(Extension(app_state))
        .layer(cors_layer(config.server.allowed_origin()?))
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "big five assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Browser access for the questionnaire client; any origin unless one is configured.
fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match origin {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}
