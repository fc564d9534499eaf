use serde::Deserialize;
use serde::Serialize;

/// A contiguous span of message content, classified for differentiated rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { content: String },
    Code { language: String, content: String },
}

impl ContentBlock {
    pub fn text(content: &str) -> ContentBlock {
        return ContentBlock::Text {
            content: content.to_string(),
        };
    }

    pub fn code(language: &str, content: &str) -> ContentBlock {
        return ContentBlock::Code {
            language: language.to_string(),
            content: content.to_string(),
        };
    }

    pub fn content(&self) -> &str {
        match self {
            ContentBlock::Text { content } => content,
            ContentBlock::Code { content, .. } => content,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { .. } => None,
            ContentBlock::Code { language, .. } => Some(language),
        }
    }

    pub fn is_code(&self) -> bool {
        return matches!(self, ContentBlock::Code { .. });
    }
}
