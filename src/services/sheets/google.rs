use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::SheetProvider;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::ClientRecord;
use crate::services::expect_success;
use crate::services::google_auth::GoogleAuth;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const CLIENT_RANGE: &str = "Clients!A:D";

pub struct GoogleSheetsClient {
    config: AppConfig,
    auth: Arc<GoogleAuth>,
    client: reqwest::Client,
}

impl GoogleSheetsClient {
    pub fn new(config: AppConfig, auth: Arc<GoogleAuth>) -> Self {
        Self {
            config,
            auth,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SheetProvider for GoogleSheetsClient {
    async fn append_client_row(&self, record: &ClientRecord) -> Result<(), AppError> {
        let spreadsheet_id = self.config.google_sheet_id()?;
        let url = format!("{SHEETS_BASE_URL}/{spreadsheet_id}/values/{CLIENT_RANGE}:append");

        let token = self.auth.access_token().await?;
        let resp = self
            .client
            .post(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(token)
            .json(&json!({
                "values": [[
                    record.name.as_str(),
                    record.phone.as_str(),
                    record.email.as_str(),
                    record.meeting_date.as_str(),
                ]],
            }))
            .send()
            .await?;

        expect_success(resp, "sheets").await?;
        Ok(())
    }
}
