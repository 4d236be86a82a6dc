use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;

use super::MessagingProvider;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::ParsedMessage;

const GRAPH_BASE_URL: &str = "https://graph.facebook.com/v22.0";

type HmacSha256 = Hmac<Sha256>;

#[derive(Deserialize)]
struct WebhookEnvelope {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Change>,
}

#[derive(Deserialize)]
struct Change {
    value: Option<ChangeValue>,
}

#[derive(Deserialize)]
struct ChangeValue {
    #[serde(default)]
    messages: Vec<InboundMessage>,
}

#[derive(Deserialize)]
struct InboundMessage {
    id: String,
    from: String,
    timestamp: String,
    #[serde(rename = "type")]
    kind: String,
    text: Option<TextBody>,
}

#[derive(Deserialize)]
struct TextBody {
    body: Option<String>,
}

/// First message of the first entry/change/value, text messages only.
/// Anything else is silently nothing to do.
pub fn parse_inbound_message(payload: &serde_json::Value) -> Option<ParsedMessage> {
    let envelope: WebhookEnvelope = serde_json::from_value(payload.clone()).ok()?;
    let message = envelope
        .entry
        .into_iter()
        .next()?
        .changes
        .into_iter()
        .next()?
        .value?
        .messages
        .into_iter()
        .next()?;

    if message.kind != "text" {
        return None;
    }

    Some(ParsedMessage {
        from: message.from,
        message_id: message.id,
        text: message
            .text
            .and_then(|t| t.body)
            .map(|body| body.trim().to_string())
            .unwrap_or_default(),
        timestamp: message.timestamp,
    })
}

/// Subscription handshake: echo the challenge only for a `subscribe` request
/// carrying the configured verify token.
pub fn verify_webhook(
    mode: &str,
    token: &str,
    challenge: &str,
    verify_token: &str,
) -> Option<String> {
    if mode == "subscribe"
        && !verify_token.is_empty()
        && token == verify_token
        && !challenge.is_empty()
    {
        return Some(challenge.to_string());
    }
    None
}

/// Checks an `X-Hub-Signature-256` header (`sha256=<hex>`) against the raw
/// request body.
pub fn validate_signature(app_secret: &str, signature: &str, body: &[u8]) -> bool {
    let Some(expected_hex) = signature.strip_prefix("sha256=") else {
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    let computed = hex::encode(mac.finalize().into_bytes());

    computed == expected_hex
}

pub struct WhatsAppClient {
    config: AppConfig,
    client: reqwest::Client,
}

impl WhatsAppClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MessagingProvider for WhatsAppClient {
    async fn send_text(&self, to: &str, body: &str) -> Result<(), AppError> {
        let phone_number_id = self.config.whatsapp_phone_number_id()?;
        let token = self.config.whatsapp_token()?;

        let resp = self
            .client
            .post(format!("{GRAPH_BASE_URL}/{phone_number_id}/messages"))
            .bearer_auth(token)
            .json(&json!({
                "messaging_product": "whatsapp",
                "to": to,
                "type": "text",
                "text": { "body": body },
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Messaging(format!(
                "WhatsApp send failed {status}: {body}"
            )));
        }

        Ok(())
    }
}
