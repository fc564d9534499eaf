use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Summary of a conversation: title, size and a preview of the latest reply.
///
/// The session never owns the messages it summarizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub message_count: u32,
    pub last_message: Option<String>,
    pub is_pinned: bool,
    pub is_archived: bool,
}
