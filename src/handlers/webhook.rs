use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::AppError;
use crate::models::{ClientRecord, Intent, MeetingRequest, ParsedMessage, ReplyDetails};
use crate::services::ai::{email, intent};
use crate::services::formatter::format_meeting_list;
use crate::services::messaging::whatsapp;
use crate::state::AppState;

const UNREAD_DIGEST_LIMIT: usize = 5;

#[derive(Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode", default)]
    pub mode: String,
    #[serde(rename = "hub.verify_token", default)]
    pub token: String,
    #[serde(rename = "hub.challenge", default)]
    pub challenge: String,
}

// GET /webhook/whatsapp
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let verify_token = match state.config.whatsapp_verify_token() {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "webhook verification unavailable");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Webhook verification failed" })),
            )
                .into_response();
        }
    };

    match whatsapp::verify_webhook(&params.mode, &params.token, &params.challenge, verify_token) {
        Some(challenge) => (StatusCode::OK, challenge).into_response(),
        None => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Webhook verification failed" })),
        )
            .into_response(),
    }
}

// POST /webhook/whatsapp
pub async fn receive(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Signature check is skipped when no app secret is configured (dev mode).
    if !state.config.whatsapp_app_secret.is_empty() {
        let signature = headers
            .get("x-hub-signature-256")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !whatsapp::validate_signature(&state.config.whatsapp_app_secret, signature, &body) {
            tracing::warn!("invalid webhook signature");
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Invalid signature" })),
            )
                .into_response();
        }
    }

    let result = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => process_event(&state, &payload).await,
        Err(e) => Err(AppError::Parse(format!("webhook body is not valid JSON: {e}"))),
    };

    match result {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "whatsapp webhook processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process webhook" })),
            )
                .into_response()
        }
    }
}

async fn process_event(state: &Arc<AppState>, payload: &Value) -> Result<Value, AppError> {
    let Some(message) = whatsapp::parse_inbound_message(payload) else {
        return Ok(json!({ "ok": true, "ignored": true }));
    };

    tracing::info!(from = %message.from, text = %message.text, "incoming WhatsApp message");

    let result = intent::classify_intent(state.llm.as_ref(), &message.text).await?;

    tracing::info!(
        intent = ?result.intent,
        confidence = result.confidence,
        "classified intent"
    );

    match result.intent {
        Intent::ScheduleMeeting => schedule_meeting(state, &message, &result.entities).await?,
        Intent::FetchTodayMeetings => fetch_today_meetings(state, &message).await?,
        Intent::SummarizeEmails => summarize_emails(state, &message).await?,
        Intent::ReplyToEmail => reply_to_email(state, &message, &result.entities).await?,
        Intent::AddTodo => add_todo(state, &message, &result.entities).await?,
        Intent::Unknown => {
            state
                .messaging
                .send_text(
                    &message.from,
                    "I can help with: schedule meeting, today's meetings, summarize emails, reply to email, and add todo.",
                )
                .await?;
        }
    }

    Ok(json!({ "ok": true }))
}

async fn schedule_meeting(
    state: &Arc<AppState>,
    message: &ParsedMessage,
    entities: &Map<String, Value>,
) -> Result<(), AppError> {
    let request = match MeetingRequest::from_entities(entities) {
        Ok(request) => request,
        Err(missing) => {
            tracing::info!(missing = ?missing, "meeting request incomplete, asking for details");
            state
                .messaging
                .send_text(
                    &message.from,
                    "Please provide full meeting details: name, phone, email, start, end, and title.",
                )
                .await?;
            return Ok(());
        }
    };

    let meeting = state.calendar.create_meeting(&request).await?;

    state
        .sheets
        .append_client_row(&ClientRecord {
            name: request.client_name.clone(),
            phone: request.client_phone.clone(),
            email: request.client_email.clone(),
            meeting_date: request.start_date_time.clone(),
        })
        .await?;

    state
        .mail
        .send_mail(
            &request.client_email,
            &format!("Meeting confirmed: {}", request.title),
            &format!(
                "Your meeting is confirmed.\nDate: {}\nGoogle Meet: {}",
                request.start_date_time, meeting.meet_link
            ),
        )
        .await?;

    state
        .messaging
        .send_text(
            &message.from,
            &format!(
                "Meeting scheduled successfully for {}. Meet link: {}",
                request.client_name, meeting.meet_link
            ),
        )
        .await?;

    Ok(())
}

async fn fetch_today_meetings(
    state: &Arc<AppState>,
    message: &ParsedMessage,
) -> Result<(), AppError> {
    let meetings = state.calendar.list_today_meetings().await?;
    state
        .messaging
        .send_text(&message.from, &format_meeting_list(&meetings))
        .await
}

async fn summarize_emails(state: &Arc<AppState>, message: &ParsedMessage) -> Result<(), AppError> {
    let emails = state.mail.list_unread_summaries(UNREAD_DIGEST_LIMIT).await?;

    if emails.is_empty() {
        return state
            .messaging
            .send_text(&message.from, "No unread emails found.")
            .await;
    }

    let report = emails
        .iter()
        .enumerate()
        .map(|(index, email)| {
            format!(
                "{}) {} from {}\n{}",
                index + 1,
                email.subject,
                email.from,
                email.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    state.messaging.send_text(&message.from, &report).await
}

async fn reply_to_email(
    state: &Arc<AppState>,
    message: &ParsedMessage,
    entities: &Map<String, Value>,
) -> Result<(), AppError> {
    let details = match ReplyDetails::from_entities(entities) {
        Ok(details) => details,
        Err(missing) => {
            tracing::info!(missing = ?missing, "email reply request incomplete, asking for details");
            state
                .messaging
                .send_text(
                    &message.from,
                    "For email reply, include messageId and your reply instruction.",
                )
                .await?;
            return Ok(());
        }
    };

    let reply = email::draft_reply(state.llm.as_ref(), &details.context, &details.instruction).await?;
    state
        .mail
        .create_reply_draft(&details.message_id, &reply)
        .await?;

    state
        .messaging
        .send_text(&message.from, "Draft reply generated and saved in Gmail drafts.")
        .await
}

async fn add_todo(
    state: &Arc<AppState>,
    message: &ParsedMessage,
    entities: &Map<String, Value>,
) -> Result<(), AppError> {
    let todo = match entities.get("todo") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => message.text.clone(),
    };

    state
        .messaging
        .send_text(&message.from, &format!("Todo captured: {todo}"))
        .await
}
