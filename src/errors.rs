#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("google auth error: {0}")]
    Auth(String),

    #[error("{service} API error {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    Ai(String),

    #[error("failed to parse AI response: {0}")]
    Parse(String),

    #[error("messaging error: {0}")]
    Messaging(String),
}
