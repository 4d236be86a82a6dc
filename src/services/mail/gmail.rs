use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::MailProvider;
use crate::errors::AppError;
use crate::models::EmailSummary;
use crate::services::ai::{email, LlmProvider};
use crate::services::google_auth::GoogleAuth;
use crate::services::{classifier, expect_success};

const GMAIL_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

#[derive(Deserialize)]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Deserialize)]
struct MessageDetail {
    id: String,
    #[serde(default)]
    snippet: String,
    payload: Option<MessagePayload>,
}

#[derive(Deserialize)]
struct MessagePayload {
    #[serde(default)]
    headers: Vec<MessageHeader>,
}

#[derive(Deserialize)]
struct MessageHeader {
    name: String,
    value: String,
}

pub struct GmailClient {
    auth: Arc<GoogleAuth>,
    llm: Arc<dyn LlmProvider>,
    client: reqwest::Client,
}

impl GmailClient {
    pub fn new(auth: Arc<GoogleAuth>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            auth,
            llm,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let token = self.auth.access_token().await?;
        let resp = self
            .client
            .get(format!("{GMAIL_BASE_URL}/{path}"))
            .bearer_auth(token)
            .send()
            .await?;

        let resp = expect_success(resp, "gmail").await?;
        Ok(resp.json().await?)
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<(), AppError> {
        let token = self.auth.access_token().await?;
        let resp = self
            .client
            .post(format!("{GMAIL_BASE_URL}/{path}"))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        expect_success(resp, "gmail").await?;
        Ok(())
    }
}

fn header_value(detail: &MessageDetail, name: &str) -> String {
    detail
        .payload
        .as_ref()
        .and_then(|payload| {
            payload
                .headers
                .iter()
                .find(|header| header.name.eq_ignore_ascii_case(name))
        })
        .map(|header| header.value.clone())
        .unwrap_or_default()
}

fn reply_draft_mime(body: &str) -> String {
    format!("Content-Type: text/plain; charset=\"UTF-8\"\n\n{body}")
}

fn outbound_mime(to: &str, subject: &str, body: &str) -> String {
    format!(
        "To: {to}\r\nSubject: {subject}\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{body}"
    )
}

#[async_trait]
impl MailProvider for GmailClient {
    async fn list_unread_summaries(&self, limit: usize) -> Result<Vec<EmailSummary>, AppError> {
        let list: MessageList = self
            .get_json(&format!("messages?q=is:unread&maxResults={limit}"))
            .await?;

        // One message at a time: the digest is small and ordering follows the
        // listing.
        let mut results = Vec::with_capacity(list.messages.len());
        for message in &list.messages {
            let detail: MessageDetail = self
                .get_json(&format!("messages/{}?format=metadata", message.id))
                .await?;

            let from = header_value(&detail, "From");
            let subject = header_value(&detail, "Subject");
            let is_important = classifier::is_important(&from, &subject, &detail.snippet);
            let summary = email::summarize_email(
                self.llm.as_ref(),
                &format!("From: {from}\nSubject: {subject}\n{}", detail.snippet),
            )
            .await?;

            results.push(EmailSummary {
                id: detail.id,
                from,
                subject,
                snippet: detail.snippet,
                summary,
                is_important,
            });
        }

        Ok(results)
    }

    async fn create_reply_draft(&self, thread_id: &str, body: &str) -> Result<(), AppError> {
        let raw = URL_SAFE_NO_PAD.encode(reply_draft_mime(body));
        self.post_json(
            "drafts",
            &json!({
                "message": { "threadId": thread_id, "raw": raw },
            }),
        )
        .await
    }

    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let raw = URL_SAFE_NO_PAD.encode(outbound_mime(to, subject, body));
        self.post_json("messages/send", &json!({ "raw": raw })).await
    }
}
