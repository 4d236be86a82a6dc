use serde_json::Value;

use super::LlmProvider;
use crate::errors::AppError;

const SUMMARIZE_PROMPT: &str = "Summarize email text for a business owner in <= 80 words. Return JSON {\"summary\": string}.";

const DRAFT_REPLY_PROMPT: &str =
    "Draft a professional and concise email reply. Return JSON {\"reply\": string}.";

pub async fn summarize_email(
    llm: &dyn LlmProvider,
    raw_email_text: &str,
) -> Result<String, AppError> {
    let content = llm.chat(SUMMARIZE_PROMPT, raw_email_text).await?;
    extract_field(&content, "summary")
}

pub async fn draft_reply(
    llm: &dyn LlmProvider,
    context: &str,
    instruction: &str,
) -> Result<String, AppError> {
    let content = llm
        .chat(
            DRAFT_REPLY_PROMPT,
            &format!("Original email context: {context}\n\nUser instruction: {instruction}"),
        )
        .await?;
    extract_field(&content, "reply")
}

fn extract_field(content: &str, key: &str) -> Result<String, AppError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::Parse(format!("AI response is not valid JSON: {e}")))?;

    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::Parse(format!("AI response missing `{key}` field")))
}
