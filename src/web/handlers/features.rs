// Introspection handlers.
//
// GET /api/v1/features      — registered generators and their feature names
// GET /api/v1/pipeline/info — topics, generators and scorer settings

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::pipeline::catalog;
use crate::web::{error_response, AppState};

pub async fn list_features(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "available_generators": state.registry.list_generators(),
    }))
}

pub async fn pipeline_info(State(state): State<AppState>) -> Response {
    match catalog::pipeline_info(&state.registry, &state.scorer, state.topics.as_ref()).await {
        Ok(info) => Json(info).into_response(),
        Err(e) => error_response(&e),
    }
}
