// POST /api/v1/emails/classify — classify one email.
//
// `mode` picks the route through the pipeline:
// - "topic" (default): feature generators -> topic scorer
// - "nearest_email": label of the most similar stored email
//
// `generators` optionally narrows the feature generators in topic mode.
// Unknown names are a 400; an empty topic store is a 500.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::pipeline::classify::{self, ClassificationMode};
use crate::store::models::Email;
use crate::web::{error_response, AppState};

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub mode: ClassificationMode,
    /// Feature generators to run (topic mode only); all when absent.
    pub generators: Option<Vec<String>>,
}

pub async fn classify_email(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Response {
    let email = Email::new(request.subject, request.body);

    match request.mode {
        ClassificationMode::Topic => {
            let generators: Option<Vec<&str>> = request
                .generators
                .as_ref()
                .map(|names| names.iter().map(String::as_str).collect());

            match classify::classify_by_topic(
                &state.registry,
                &state.scorer,
                state.topics.as_ref(),
                &email,
                generators.as_deref(),
            )
            .await
            {
                Ok(result) => Json(serde_json::json!({
                    "mode": ClassificationMode::Topic,
                    "predicted_topic": result.predicted_topic,
                    "topic_scores": result.topic_scores,
                    "features": result.features,
                    "available_topics": result.available_topics,
                }))
                .into_response(),
                Err(e) => error_response(&e),
            }
        }
        ClassificationMode::NearestEmail => {
            match classify::classify_by_nearest(state.emails.as_ref(), &email).await {
                Ok(result) => Json(serde_json::json!({
                    "mode": ClassificationMode::NearestEmail,
                    "predicted_topic": result.predicted_class,
                    "match": result.matched,
                    "similarity": result.similarity,
                }))
                .into_response(),
                Err(e) => error_response(&e),
            }
        }
    }
}
