use chrono::DateTime;

use crate::models::MeetingSlot;

pub fn format_meeting_list(meetings: &[MeetingSlot]) -> String {
    if meetings.is_empty() {
        return "You have no meetings scheduled for today.".to_string();
    }

    let lines: Vec<String> = meetings
        .iter()
        .enumerate()
        .map(|(index, meeting)| {
            let when = DateTime::parse_from_rfc3339(&meeting.start)
                .map(|dt| dt.format("%b %e, %Y %H:%M").to_string())
                .unwrap_or_else(|_| "Unknown time".to_string());
            let link = meeting
                .meet_link
                .as_deref()
                .map(|l| format!(" | Meet: {l}"))
                .unwrap_or_default();
            format!("{}. {} at {when}{link}", index + 1, meeting.title)
        })
        .collect();

    format!("Today's meetings:\n{}", lines.join("\n"))
}
