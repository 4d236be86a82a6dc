pub mod google;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::ClientRecord;

#[async_trait]
pub trait SheetProvider: Send + Sync {
    /// Appends one row. No idempotence guard; repeated calls with identical
    /// data append duplicate rows.
    async fn append_client_row(&self, record: &ClientRecord) -> Result<(), AppError>;
}
