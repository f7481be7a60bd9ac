// Topic handlers.
//
// GET  /api/v1/topics — topic names
// POST /api/v1/topics — add a topic; 409 if the name is taken

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::pipeline::catalog;
use crate::store::traits::TopicStore;
use crate::web::{error_response, AppState};

#[derive(Debug, Deserialize)]
pub struct AddTopicRequest {
    pub name: String,
    pub description: String,
}

pub async fn list_topics(State(state): State<AppState>) -> Response {
    match state.topics.load().await {
        Ok(table) => {
            let topics: Vec<String> = table.into_keys().collect();
            Json(serde_json::json!({ "topics": topics })).into_response()
        }
        Err(e) => error_response(&e),
    }
}

pub async fn add_topic(
    State(state): State<AppState>,
    Json(request): Json<AddTopicRequest>,
) -> Response {
    let result =
        catalog::add_topic(state.topics.as_ref(), &request.name, &request.description).await;

    match result {
        Ok(table) => {
            let topics: Vec<String> = table.into_keys().collect();
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "message": format!("Topic '{}' added", request.name),
                    "topics": topics,
                })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}
