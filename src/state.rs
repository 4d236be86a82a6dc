use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::ai::LlmProvider;
use crate::services::calendar::CalendarProvider;
use crate::services::mail::MailProvider;
use crate::services::messaging::MessagingProvider;
use crate::services::sheets::SheetProvider;

pub struct AppState {
    pub config: AppConfig,
    pub llm: Arc<dyn LlmProvider>,
    pub messaging: Box<dyn MessagingProvider>,
    pub calendar: Box<dyn CalendarProvider>,
    pub mail: Box<dyn MailProvider>,
    pub sheets: Box<dyn SheetProvider>,
}
