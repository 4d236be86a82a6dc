pub mod ai;
pub mod calendar;
pub mod classifier;
pub mod formatter;
pub mod google_auth;
pub mod mail;
pub mod messaging;
pub mod sheets;

use crate::errors::AppError;

/// Passes a response through when it is 2xx, otherwise drains the body into
/// an `Upstream` error.
pub(crate) async fn expect_success(
    resp: reqwest::Response,
    service: &'static str,
) -> Result<reqwest::Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(AppError::Upstream {
        service,
        status: status.as_u16(),
        body,
    })
}
