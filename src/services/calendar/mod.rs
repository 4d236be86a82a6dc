pub mod google;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{CreatedMeeting, MeetingRequest, MeetingSlot};

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn create_meeting(&self, request: &MeetingRequest) -> Result<CreatedMeeting, AppError>;

    /// Single-occurrence events in the local midnight-to-midnight window,
    /// ordered by start time.
    async fn list_today_meetings(&self) -> Result<Vec<MeetingSlot>, AppError>;
}
