use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::intent::{entity_string, take_string};

/// Everything needed to put a client meeting on the calendar. All fields
/// except `description` must be present before a meeting is created; start
/// preceding end is the calendar provider's problem, not ours.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRequest {
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub start_date_time: String,
    pub end_date_time: String,
    pub title: String,
    pub description: Option<String>,
}

impl MeetingRequest {
    /// Decodes the classifier's entities map, returning the names of any
    /// missing required fields.
    pub fn from_entities(entities: &Map<String, Value>) -> Result<Self, Vec<&'static str>> {
        let mut missing = Vec::new();
        let client_name = take_string(entities, "clientName", &mut missing);
        let client_phone = take_string(entities, "clientPhone", &mut missing);
        let client_email = take_string(entities, "clientEmail", &mut missing);
        let start_date_time = take_string(entities, "startDateTime", &mut missing);
        let end_date_time = take_string(entities, "endDateTime", &mut missing);
        let title = take_string(entities, "title", &mut missing);

        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Self {
            client_name,
            client_phone,
            client_email,
            start_date_time,
            end_date_time,
            title,
            description: entity_string(entities, "description"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedMeeting {
    pub event_id: String,
    /// Empty string when the provider returns no conference link.
    pub meet_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetingSlot {
    pub start: String,
    pub title: String,
    pub meet_link: Option<String>,
}

/// One append-only spreadsheet row. There is no update or delete path.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub meeting_date: String,
}
