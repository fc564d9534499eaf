#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ContentBlock;
use super::Role;
use crate::domain::services::tokenize;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Normal,
    Error,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Sending,
    Sent,
    Failed,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    pub message_type: MessageType,
}

impl Message {
    pub fn new(id: &str, role: Role, content: &str, status: MessageStatus) -> Message {
        return Message {
            id: id.to_string(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
            status,
            message_type: MessageType::Normal,
        };
    }

    pub fn new_with_type(
        id: &str,
        role: Role,
        message_type: MessageType,
        content: &str,
    ) -> Message {
        return Message {
            message_type,
            ..Message::new(id, role, content, MessageStatus::Sent)
        };
    }

    pub fn is_failed(&self) -> bool {
        return self.status == MessageStatus::Failed;
    }

    /// Splits the message content into prose and fenced code blocks.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        return tokenize(&self.content);
    }

    pub fn code_blocks(&self) -> Vec<ContentBlock> {
        return self
            .blocks()
            .into_iter()
            .filter(|block| block.is_code())
            .collect();
    }
}
