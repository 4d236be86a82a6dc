pub mod email;
pub mod intent;
pub mod openai;

use async_trait::async_trait;

use crate::errors::AppError;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// One chat-completion round trip. Implementations ask the model for a
    /// JSON object reply; callers parse the returned text.
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError>;
}
