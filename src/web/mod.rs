// Web server — Axum JSON API over the classification pipeline.
//
// Everything under /api/v1 serves JSON. Handlers share read-only state
// (config, generator registry, scorer) and the two stores through AppState;
// topic and email data are reloaded from the stores on every request.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::ClassifyError;
use crate::features::registry::FeatureGeneratorRegistry;
use crate::scoring::topic::TopicScorer;
use crate::store::traits::{EmailStore, TopicStore};

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<FeatureGeneratorRegistry>,
    pub scorer: TopicScorer,
    pub topics: Arc<dyn TopicStore>,
    pub emails: Arc<dyn EmailStore>,
}

impl AppState {
    /// State with the built-in generators and a scorer configured from `config`.
    pub fn new(config: Config, topics: Arc<dyn TopicStore>, emails: Arc<dyn EmailStore>) -> Self {
        let scorer = TopicScorer::new(config.decay_scale);
        Self {
            config: Arc::new(config),
            registry: Arc::new(FeatureGeneratorRegistry::builtin()),
            scorer,
            topics,
            emails,
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("mailtopic listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/emails",
            get(handlers::emails::list_emails).post(handlers::emails::store_email),
        )
        .route("/emails/classify", post(handlers::classify::classify_email))
        .route(
            "/topics",
            get(handlers::topics::list_topics).post(handlers::topics::add_topic),
        )
        .route("/features", get(handlers::features::list_features))
        .route("/pipeline/info", get(handlers::features::pipeline_info));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check — always 200 with the configured service name.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "healthy",
            "service": state.config.project_name,
        })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// Map a pipeline error to a response.
///
/// Domain errors keep their message and get a 4xx/5xx by kind. Anything
/// else is an I/O or data problem: logged, and reported without detail.
pub fn error_response(err: &anyhow::Error) -> Response {
    match err.downcast_ref::<ClassifyError>() {
        Some(e @ ClassifyError::TopicExists(_)) => {
            api_error(StatusCode::CONFLICT, &e.to_string())
        }
        Some(e) if e.is_client_error() => api_error(StatusCode::BAD_REQUEST, &e.to_string()),
        Some(e) => {
            tracing::error!(error = %e, "Pipeline misconfigured");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
        None => {
            tracing::error!(error = %err, "Store error");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Store error")
        }
    }
}
