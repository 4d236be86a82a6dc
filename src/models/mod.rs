pub mod email;
pub mod intent;
pub mod meeting;
pub mod message;

pub use email::EmailSummary;
pub use intent::{Intent, IntentResult, ReplyDetails};
pub use meeting::{ClientRecord, CreatedMeeting, MeetingRequest, MeetingSlot};
pub use message::ParsedMessage;
