use serde::Deserialize;
use serde_json::{Map, Value};

use super::LlmProvider;
use crate::errors::AppError;
use crate::models::{Intent, IntentResult};

const CLASSIFY_PROMPT: &str = "You classify WhatsApp assistant commands. Return JSON with intent, confidence (0-1), and entities object. Valid intents: schedule_meeting, fetch_today_meetings, summarize_emails, reply_to_email, add_todo, unknown.";

pub async fn classify_intent(
    llm: &dyn LlmProvider,
    message: &str,
) -> Result<IntentResult, AppError> {
    let content = llm
        .chat(CLASSIFY_PROMPT, &format!("Message: {message}"))
        .await?;
    parse_intent_response(&content)
}

#[derive(Deserialize)]
struct RawIntentResult {
    intent: Option<Intent>,
    confidence: Option<f64>,
    entities: Option<Map<String, Value>>,
}

/// Non-JSON content is a hard parse failure; individually absent fields fall
/// back to unknown / 0 / empty.
fn parse_intent_response(content: &str) -> Result<IntentResult, AppError> {
    let raw: RawIntentResult = serde_json::from_str(content)
        .map_err(|e| AppError::Parse(format!("intent response is not valid JSON: {e}")))?;

    Ok(IntentResult {
        intent: raw.intent.unwrap_or(Intent::Unknown),
        confidence: raw.confidence.unwrap_or(0.0),
        entities: raw.entities.unwrap_or_default(),
    })
}
