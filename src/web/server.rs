use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::session::{Recorder, DEFAULT_TICK};

use super::api::metrics as metrics_handlers;
use super::api::session as session_handlers;
use super::api_doc::ApiDoc;
use super::auth::AppState;
use super::config::Config;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Metrics API endpoints
        .route("/api/metrics/summary", post(metrics_handlers::summary))
        .route("/api/metrics/duration", get(metrics_handlers::duration))
        .route("/api/metrics/pace", get(metrics_handlers::pace))
        // Session API endpoints
        .route("/api/session/start", post(session_handlers::start))
        .route("/api/session/samples", post(session_handlers::record_sample))
        .route("/api/session/stop", post(session_handlers::stop))
        .route("/api/session/status", get(session_handlers::status))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let tick = config.session.tick_interval().unwrap_or_else(|e| {
        log::warn!("{}; falling back to {:?}", e, DEFAULT_TICK);
        DEFAULT_TICK
    });
    let recorder = Recorder::new(tick, config.metrics.options());

    if config.api_keys.is_empty() {
        log::warn!("No API keys configured; every request will be rejected");
    }

    let state = AppState {
        config: Arc::new(config),
        recorder: Arc::new(Mutex::new(recorder)),
    };

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
