use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::errors::AppError;
use crate::state::AppState;

const SCAN_LIMIT: usize = 10;

// GET /cron/check-emails, fired by an external scheduler.
pub async fn check_emails(State(state): State<Arc<AppState>>) -> Response {
    if state.config.owner_whatsapp_number.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "OWNER_WHATSAPP_NUMBER is not configured" })),
        )
            .into_response();
    }

    match scan_unread(&state).await {
        Ok((scanned, important)) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "scanned": scanned, "important": important })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "email check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Email check failed" })),
            )
                .into_response()
        }
    }
}

async fn scan_unread(state: &Arc<AppState>) -> Result<(usize, usize), AppError> {
    let emails = state.mail.list_unread_summaries(SCAN_LIMIT).await?;
    let important: Vec<_> = emails.iter().filter(|email| email.is_important).collect();

    for email in &important {
        state
            .messaging
            .send_text(
                &state.config.owner_whatsapp_number,
                &format!(
                    "Important email detected:\nFrom: {}\nSubject: {}\nSummary: {}",
                    email.from, email.subject, email.summary
                ),
            )
            .await?;
    }

    Ok((emails.len(), important.len()))
}
