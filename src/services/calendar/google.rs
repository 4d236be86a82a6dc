use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveTime};
use serde::Deserialize;
use serde_json::json;

use super::CalendarProvider;
use crate::errors::AppError;
use crate::models::{CreatedMeeting, MeetingRequest, MeetingSlot};
use crate::services::expect_success;
use crate::services::google_auth::GoogleAuth;

const CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary";

pub struct GoogleCalendarClient {
    auth: Arc<GoogleAuth>,
    client: reqwest::Client,
}

impl GoogleCalendarClient {
    pub fn new(auth: Arc<GoogleAuth>) -> Self {
        Self {
            auth,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct CreatedEvent {
    id: String,
    #[serde(rename = "hangoutLink")]
    hangout_link: Option<String>,
}

#[derive(Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<Event>,
}

#[derive(Deserialize)]
struct Event {
    summary: Option<String>,
    start: Option<EventTime>,
    #[serde(rename = "hangoutLink")]
    hangout_link: Option<String>,
}

#[derive(Deserialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

fn slot_from_event(event: Event) -> MeetingSlot {
    MeetingSlot {
        start: event
            .start
            .and_then(|start| start.date_time)
            .unwrap_or_default(),
        title: event
            .summary
            .unwrap_or_else(|| "Untitled meeting".to_string()),
        meet_link: event.hangout_link,
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarClient {
    async fn create_meeting(&self, request: &MeetingRequest) -> Result<CreatedMeeting, AppError> {
        let payload = json!({
            "summary": request.title,
            "description": request.description.as_deref().unwrap_or(""),
            "start": { "dateTime": request.start_date_time },
            "end": { "dateTime": request.end_date_time },
            "attendees": [{ "email": request.client_email }],
            "conferenceData": {
                "createRequest": {
                    "requestId": format!("meet-{}", uuid::Uuid::new_v4()),
                    "conferenceSolutionKey": { "type": "hangoutsMeet" },
                },
            },
        });

        let token = self.auth.access_token().await?;
        let resp = self
            .client
            .post(format!("{CALENDAR_BASE_URL}/events"))
            .query(&[("conferenceDataVersion", "1"), ("sendUpdates", "all")])
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let resp = expect_success(resp, "calendar").await?;
        let event: CreatedEvent = resp.json().await?;

        Ok(CreatedMeeting {
            event_id: event.id,
            meet_link: event.hangout_link.unwrap_or_default(),
        })
    }

    async fn list_today_meetings(&self) -> Result<Vec<MeetingSlot>, AppError> {
        let now = Local::now();
        let start = now.with_time(NaiveTime::MIN).single().unwrap_or(now);
        let end = start + Duration::days(1);
        let time_min = start.to_rfc3339();
        let time_max = end.to_rfc3339();

        let token = self.auth.access_token().await?;
        let resp = self
            .client
            .get(format!("{CALENDAR_BASE_URL}/events"))
            .query(&[
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
            ])
            .bearer_auth(token)
            .send()
            .await?;

        let resp = expect_success(resp, "calendar").await?;
        let list: EventList = resp.json().await?;

        Ok(list.items.into_iter().map(slot_from_event).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_without_summary_becomes_untitled() {
        let list: EventList = serde_json::from_value(json!({
            "items": [
                { "start": { "dateTime": "2024-05-01T10:00:00Z" } },
            ],
        }))
        .unwrap();

        let slots: Vec<MeetingSlot> = list.items.into_iter().map(slot_from_event).collect();

        assert_eq!(slots[0].title, "Untitled meeting");
        assert_eq!(slots[0].start, "2024-05-01T10:00:00Z");
        assert_eq!(slots[0].meet_link, None);
    }

    #[test]
    fn event_with_link_keeps_it() {
        let list: EventList = serde_json::from_value(json!({
            "items": [{
                "summary": "Sync",
                "start": { "dateTime": "2024-05-01T10:00:00Z" },
                "hangoutLink": "https://meet.google.com/xyz",
            }],
        }))
        .unwrap();

        let slot = list.items.into_iter().map(slot_from_event).next().unwrap();
        assert_eq!(slot.title, "Sync");
        assert_eq!(slot.meet_link.as_deref(), Some("https://meet.google.com/xyz"));
    }

    #[test]
    fn empty_event_list_deserializes() {
        let list: EventList = serde_json::from_value(json!({})).unwrap();
        assert!(list.items.is_empty());
    }
}
