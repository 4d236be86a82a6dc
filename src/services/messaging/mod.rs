pub mod whatsapp;

use async_trait::async_trait;

use crate::errors::AppError;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send_text(&self, to: &str, body: &str) -> Result<(), AppError>;
}
