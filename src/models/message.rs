use serde::{Deserialize, Serialize};

/// One inbound text message extracted from a webhook envelope. Consumed within
/// the request that produced it, never retained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedMessage {
    pub from: String,
    pub message_id: String,
    pub text: String,
    pub timestamp: String,
}
