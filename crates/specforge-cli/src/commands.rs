#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    Retry,
    Clear,
    Session,
    Help,
    Quit,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }

        let name = text.split_whitespace().next().unwrap_or_default();
        let command = match name {
            "/retry" | "/r" => SlashCommand::Retry,
            "/clear" => SlashCommand::Clear,
            "/session" | "/s" => SlashCommand::Session,
            "/help" | "/h" => SlashCommand::Help,
            "/quit" | "/exit" | "/q" => SlashCommand::Quit,
            _ => return None,
        };

        return Some(command);
    }
}

pub fn help_text() -> String {
    let text = r#"
Describe the backend you want and specforge will generate a specification for it.

COMMANDS:
- /retry (/r) - Resends your last message if it failed.
- /clear - Clears the conversation and starts a new session.
- /session (/s) - Shows the current session summary.
- /quit /exit (/q) - Exit specforge.
- /help (/h) - Provides this help menu.
        "#;

    text.trim().to_string()
}
