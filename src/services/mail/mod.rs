pub mod gmail;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::EmailSummary;

#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Summaries for up to `limit` unread messages. Any single message's
    /// fetch or summarization failing fails the whole listing.
    async fn list_unread_summaries(&self, limit: usize) -> Result<Vec<EmailSummary>, AppError>;

    async fn create_reply_draft(&self, thread_id: &str, body: &str) -> Result<(), AppError>;

    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
