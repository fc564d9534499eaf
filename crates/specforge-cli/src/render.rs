use specforge_chat::{ChatSession, ContentBlock, Message, MessageStatus, MessageType, Role};
use yansi::Paint;

fn label(message: &Message) -> String {
    match (message.role, message.message_type) {
        (Role::User, _) => Paint::cyan("you").bold().to_string(),
        (Role::Assistant, MessageType::Error) => Paint::red("specforge").bold().to_string(),
        (Role::Assistant, MessageType::Normal) => Paint::green("specforge").bold().to_string(),
    }
}

/// Renders a message with its code blocks numbered in order of appearance.
pub fn render_message(message: &Message) -> String {
    let mut lines = vec![format!("{}:", label(message))];
    let mut code_index = 0;

    for block in message.blocks() {
        match block {
            ContentBlock::Text { content } => lines.push(content),
            ContentBlock::Code { language, content } => {
                code_index += 1;
                lines.push(format!("({code_index}) ```{language}"));
                lines.push(content);
                lines.push("```".to_string());
            }
        }
    }

    return lines.join("\n");
}

pub fn render_status(message: &Message) -> Option<String> {
    if message.role != Role::User {
        return None;
    }

    match message.status {
        MessageStatus::Failed => Some(
            Paint::red("Message failed to send. Type /retry to resend it.").to_string(),
        ),
        MessageStatus::Sending | MessageStatus::Sent => None,
    }
}

pub fn render_session(session: Option<&ChatSession>) -> String {
    let Some(session) = session else {
        return "No active session.".to_string();
    };

    let mut lines = vec![
        format!("Session: {}", session.title),
        format!("Id: {}", session.id),
        format!("Started: {}", session.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
        format!("Messages: {}", session.message_count),
    ];
    if let Some(last_message) = &session.last_message {
        lines.push(format!("Last message: {last_message}"));
    }

    return lines.join("\n");
}
