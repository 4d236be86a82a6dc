use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ScheduleMeeting,
    FetchTodayMeetings,
    SummarizeEmails,
    ReplyToEmail,
    AddTodo,
    #[serde(other)]
    Unknown,
}

/// Classifier output. The entities map is whatever the model extracted; each
/// intent branch decodes it into its own struct before acting.
#[derive(Debug, Clone)]
pub struct IntentResult {
    pub intent: Intent,
    pub confidence: f64,
    pub entities: Map<String, Value>,
}

/// Fields required before drafting an email reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyDetails {
    pub message_id: String,
    pub instruction: String,
    pub context: String,
}

impl ReplyDetails {
    /// Decodes the entities map, returning the names of any missing fields.
    pub fn from_entities(entities: &Map<String, Value>) -> Result<Self, Vec<&'static str>> {
        let mut missing = Vec::new();
        let message_id = take_string(entities, "messageId", &mut missing);
        let instruction = take_string(entities, "instruction", &mut missing);
        let context = take_string(entities, "context", &mut missing);

        if missing.is_empty() {
            Ok(Self {
                message_id,
                instruction,
                context,
            })
        } else {
            Err(missing)
        }
    }
}

pub(crate) fn entity_string(entities: &Map<String, Value>, key: &str) -> Option<String> {
    match entities.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn take_string(
    entities: &Map<String, Value>,
    key: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match entity_string(entities, key) {
        Some(value) => value,
        None => {
            missing.push(key);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entities(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn intent_deserializes_snake_case() {
        let intent: Intent = serde_json::from_value(json!("schedule_meeting")).unwrap();
        assert_eq!(intent, Intent::ScheduleMeeting);
    }

    #[test]
    fn unrecognized_intent_falls_back_to_unknown() {
        let intent: Intent = serde_json::from_value(json!("order_pizza")).unwrap();
        assert_eq!(intent, Intent::Unknown);
    }

    #[test]
    fn reply_details_complete() {
        let details = ReplyDetails::from_entities(&entities(json!({
            "messageId": "m-1",
            "instruction": "decline politely",
            "context": "Can we meet Friday?",
        })))
        .unwrap();
        assert_eq!(details.message_id, "m-1");
    }

    #[test]
    fn reply_details_reports_missing_fields() {
        let missing = ReplyDetails::from_entities(&entities(json!({
            "messageId": "m-1",
        })))
        .unwrap_err();
        assert_eq!(missing, vec!["instruction", "context"]);
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let missing = ReplyDetails::from_entities(&entities(json!({
            "messageId": "  ",
            "instruction": "x",
            "context": "y",
        })))
        .unwrap_err();
        assert_eq!(missing, vec!["messageId"]);
    }
}
