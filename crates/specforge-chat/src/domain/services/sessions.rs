#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::ChatSession;

pub const TITLE_MAX_WORDS: usize = 6;
pub const PREVIEW_MAX_CHARS: usize = 100;
pub const TRUNCATION_MARKER: &str = "...";

/// Derives and updates session summaries from message traffic.
pub struct Sessions {}

impl Sessions {
    pub fn create_id() -> String {
        return format!("session-{}", Uuid::new_v4());
    }

    /// First six words of the message, with a marker when words were dropped.
    pub fn title_from(first_message: &str) -> String {
        let words: Vec<&str> = first_message.split_whitespace().collect();
        let mut title = words
            .iter()
            .take(TITLE_MAX_WORDS)
            .copied()
            .collect::<Vec<&str>>()
            .join(" ");

        if words.len() > TITLE_MAX_WORDS {
            title.push_str(TRUNCATION_MARKER);
        }

        return title;
    }

    pub fn preview_from(reply: &str) -> String {
        let mut chars = reply.chars();
        let mut preview: String = chars.by_ref().take(PREVIEW_MAX_CHARS).collect();
        if chars.next().is_some() {
            preview.push_str(TRUNCATION_MARKER);
        }

        return preview;
    }

    pub fn create_session(first_message: &str) -> ChatSession {
        return ChatSession {
            id: Sessions::create_id(),
            title: Sessions::title_from(first_message),
            timestamp: Utc::now(),
            message_count: 1,
            last_message: Some(first_message.to_string()),
            is_pinned: false,
            is_archived: false,
        };
    }

    /// Accounts for one completed user/assistant pair.
    pub fn record_exchange(session: &ChatSession, assistant_reply: &str) -> ChatSession {
        return ChatSession {
            message_count: session.message_count + 2,
            last_message: Some(Sessions::preview_from(assistant_reply)),
            ..session.clone()
        };
    }
}
