use std::sync::Mutex;

use chrono::Utc;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::AppError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Tokens closer than this to expiry are treated as already expired.
const EXPIRY_MARGIN_MS: i64 = 60_000;

#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at_ms: i64,
}

impl CachedToken {
    fn is_fresh(&self, now_ms: i64) -> bool {
        self.expires_at_ms > now_ms + EXPIRY_MARGIN_MS
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Refresh-token exchange with a single process-wide cache slot. Two
/// concurrent callers racing past a stale token may both refresh; the second
/// result simply overwrites the first, which the provider tolerates.
pub struct GoogleAuth {
    config: AppConfig,
    client: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

impl GoogleAuth {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            cache: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, AppError> {
        let now_ms = Utc::now().timestamp_millis();

        if let Some(token) = self.cache.lock().unwrap().as_ref() {
            if token.is_fresh(now_ms) {
                return Ok(token.access_token.clone());
            }
        }

        // Lock is not held across the exchange.
        let params = [
            ("client_id", self.config.google_client_id()?),
            ("client_secret", self.config.google_client_secret()?),
            ("refresh_token", self.config.google_refresh_token()?),
            ("grant_type", "refresh_token"),
        ];

        let resp = self.client.post(TOKEN_URL).form(&params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!(
                "token refresh failed: {status} {body}"
            )));
        }

        let data: TokenResponse = resp.json().await?;

        let token = CachedToken {
            access_token: data.access_token,
            expires_at_ms: now_ms + data.expires_in * 1000,
        };
        let access_token = token.access_token.clone();
        *self.cache.lock().unwrap() = Some(token);

        Ok(access_token)
    }
}
