use std::env;

use crate::errors::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_refresh_token: String,
    pub google_sheet_id: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub whatsapp_token: String,
    pub whatsapp_phone_number_id: String,
    pub whatsapp_verify_token: String,
    pub whatsapp_app_secret: String,
    pub owner_whatsapp_number: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            google_refresh_token: env::var("GOOGLE_REFRESH_TOKEN").unwrap_or_default(),
            google_sheet_id: env::var("GOOGLE_SHEET_ID").unwrap_or_default(),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4.1-mini".to_string()),
            whatsapp_token: env::var("WHATSAPP_TOKEN").unwrap_or_default(),
            whatsapp_phone_number_id: env::var("WHATSAPP_PHONE_NUMBER_ID").unwrap_or_default(),
            whatsapp_verify_token: env::var("WHATSAPP_VERIFY_TOKEN").unwrap_or_default(),
            whatsapp_app_secret: env::var("WHATSAPP_APP_SECRET").unwrap_or_default(),
            owner_whatsapp_number: env::var("OWNER_WHATSAPP_NUMBER").unwrap_or_default(),
        }
    }

    /// Log keys that are absent. Absence only becomes an error at the first
    /// call that actually needs the value.
    pub fn warn_missing(&self) {
        for (key, value) in [
            ("GOOGLE_CLIENT_ID", &self.google_client_id),
            ("GOOGLE_CLIENT_SECRET", &self.google_client_secret),
            ("GOOGLE_REFRESH_TOKEN", &self.google_refresh_token),
            ("GOOGLE_SHEET_ID", &self.google_sheet_id),
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("WHATSAPP_TOKEN", &self.whatsapp_token),
            ("WHATSAPP_PHONE_NUMBER_ID", &self.whatsapp_phone_number_id),
            ("WHATSAPP_VERIFY_TOKEN", &self.whatsapp_verify_token),
        ] {
            if value.is_empty() {
                tracing::warn!(key, "missing env var; API calls that need it will fail");
            }
        }
    }

    pub fn google_client_id(&self) -> Result<&str, AppError> {
        required(&self.google_client_id, "GOOGLE_CLIENT_ID")
    }

    pub fn google_client_secret(&self) -> Result<&str, AppError> {
        required(&self.google_client_secret, "GOOGLE_CLIENT_SECRET")
    }

    pub fn google_refresh_token(&self) -> Result<&str, AppError> {
        required(&self.google_refresh_token, "GOOGLE_REFRESH_TOKEN")
    }

    pub fn google_sheet_id(&self) -> Result<&str, AppError> {
        required(&self.google_sheet_id, "GOOGLE_SHEET_ID")
    }

    pub fn openai_api_key(&self) -> Result<&str, AppError> {
        required(&self.openai_api_key, "OPENAI_API_KEY")
    }

    pub fn whatsapp_token(&self) -> Result<&str, AppError> {
        required(&self.whatsapp_token, "WHATSAPP_TOKEN")
    }

    pub fn whatsapp_phone_number_id(&self) -> Result<&str, AppError> {
        required(&self.whatsapp_phone_number_id, "WHATSAPP_PHONE_NUMBER_ID")
    }

    pub fn whatsapp_verify_token(&self) -> Result<&str, AppError> {
        required(&self.whatsapp_verify_token, "WHATSAPP_VERIFY_TOKEN")
    }
}

fn required<'a>(value: &'a str, key: &'static str) -> Result<&'a str, AppError> {
    if value.is_empty() {
        Err(AppError::Config(format!("missing required env var: {key}")))
    } else {
        Ok(value)
    }
}
