use async_trait::async_trait;
use serde_json::json;

use super::LlmProvider;
use crate::config::AppConfig;
use crate::errors::AppError;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    config: AppConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError> {
        let body = json!({
            "model": self.config.openai_model,
            "temperature": 0.1,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "response_format": { "type": "json_object" },
        });

        let resp = self
            .client
            .post(format!("{OPENAI_BASE_URL}/chat/completions"))
            .bearer_auth(self.config.openai_api_key()?)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Ai(format!("OpenAI API error {status}: {body}")));
        }

        let data: serde_json::Value = resp.json().await?;

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AppError::Ai("OpenAI response did not include message content".to_string())
            })
    }
}
