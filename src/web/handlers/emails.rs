// Stored email handlers.
//
// GET  /api/v1/emails — every stored email, in storage order
// POST /api/v1/emails — store an email, optionally labeled with a topic
//
// There is no email ID beyond the array position, which POST returns as
// `email_id`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::pipeline::catalog;
use crate::store::models::{Email, StoredEmail};
use crate::store::traits::EmailStore;
use crate::web::{error_response, AppState};

#[derive(Debug, Deserialize)]
pub struct StoreEmailRequest {
    pub subject: String,
    pub body: String,
    /// Must name an existing topic when present.
    pub ground_truth: Option<String>,
}

pub async fn list_emails(State(state): State<AppState>) -> Response {
    match state.emails.list().await {
        Ok(emails) => Json(serde_json::json!({
            "count": emails.len(),
            "emails": emails,
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn store_email(
    State(state): State<AppState>,
    Json(request): Json<StoreEmailRequest>,
) -> Response {
    let email = StoredEmail::new(
        Email::new(request.subject, request.body),
        request.ground_truth,
    );

    match catalog::store_email(state.topics.as_ref(), state.emails.as_ref(), email).await {
        Ok(email_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Email stored",
                "email_id": email_id,
            })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}
