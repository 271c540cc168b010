use serde::{Deserialize, Serialize};

use super::enums::MessageSender;

/// One line of the assistant transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    #[serde(rename = "type")]
    pub sender: MessageSender,
    pub message: String,
    pub timestamp: String,
}
