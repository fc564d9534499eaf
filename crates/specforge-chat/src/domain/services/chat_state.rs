#[cfg(test)]
#[path = "chat_state_test.rs"]
mod tests;

use strum_macros::Display;

use super::format_spec_response;
use super::Sessions;
use crate::domain::models::ChatSession;
use crate::domain::models::CompletedExchange;
use crate::domain::models::Message;
use crate::domain::models::MessageStatus;
use crate::domain::models::MessageType;
use crate::domain::models::PendingExchange;
use crate::domain::models::Role;
use crate::domain::models::SpecResponse;
use crate::errors::PipelineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PipelineStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct InFlight {
    generation: u64,
    message_id: String,
}

/// Message list, session summary and exchange status of one conversation.
///
/// All mutation goes through the transition functions below. At most one exchange
/// is in flight; replies are matched to it by generation, so a reply that arrives
/// after `clear` or after a newer send is discarded.
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<Message>,
    session: Option<ChatSession>,
    status: PipelineStatus,
    retry_target: Option<Message>,
    last_error: Option<String>,
    generation: u64,
    in_flight: Option<InFlight>,
    next_message_seq: u64,
}

fn failure_text(err: &PipelineError) -> String {
    return format!(
        "I apologize, but I encountered an error: {err}. Please try again or rephrase your request."
    );
}

impl ChatState {
    pub fn new() -> ChatState {
        return ChatState::default();
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn session(&self) -> Option<&ChatSession> {
        return self.session.as_ref();
    }

    pub fn status(&self) -> PipelineStatus {
        return self.status;
    }

    pub fn is_sending(&self) -> bool {
        return self.status == PipelineStatus::Sending;
    }

    pub fn retry_target(&self) -> Option<&Message> {
        return self.retry_target.as_ref();
    }

    pub fn last_error(&self) -> Option<&str> {
        return self.last_error.as_deref();
    }

    fn next_id(&mut self) -> String {
        self.next_message_seq += 1;
        return format!("msg-{}", self.next_message_seq);
    }

    fn set_message_status(&mut self, message_id: &str, status: MessageStatus) -> Option<Message> {
        let message = self.messages.iter_mut().find(|msg| msg.id == message_id)?;
        message.status = status;
        return Some(message.clone());
    }

    /// Admits a new user message and moves the pipeline to `Sending`.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingExchange, PipelineError> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(PipelineError::Validation);
        }

        if self.is_sending() {
            tracing::debug!("send rejected, an exchange is already in flight");
            return Err(PipelineError::ConcurrencyRejection);
        }

        self.last_error = None;
        self.retry_target = None;

        if self.session.is_none() {
            let session = Sessions::create_session(prompt);
            tracing::debug!(session_id = %session.id, title = %session.title, "session created");
            self.session = Some(session);
        }

        let id = self.next_id();
        self.messages.push(Message::new(
            &id,
            Role::User,
            prompt,
            MessageStatus::Sending,
        ));

        self.generation += 1;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            message_id: id.clone(),
        });
        self.status = PipelineStatus::Sending;

        return Ok(PendingExchange {
            generation: self.generation,
            message_id: id,
            prompt: prompt.to_string(),
        });
    }

    /// Applies the endpoint's reply. Returns false when the reply is stale and was ignored.
    pub fn complete(&mut self, exchange: CompletedExchange) -> bool {
        let current = InFlight {
            generation: exchange.generation,
            message_id: exchange.message_id.clone(),
        };
        if self.in_flight.as_ref() != Some(&current) {
            tracing::warn!(
                generation = exchange.generation,
                current_generation = self.generation,
                "discarding stale reply"
            );
            return false;
        }
        self.in_flight = None;

        let result = match exchange.outcome {
            Ok(SpecResponse::Ok(payload)) => Ok(payload),
            Ok(SpecResponse::Error(message)) => Err(PipelineError::Application(message)),
            Err(err) => Err(PipelineError::Transport(err.to_string())),
        };

        match result {
            Ok(payload) => {
                self.set_message_status(&exchange.message_id, MessageStatus::Sent);

                let reply = format_spec_response(&payload);
                let id = self.next_id();
                self.messages.push(Message::new(
                    &id,
                    Role::Assistant,
                    &reply,
                    MessageStatus::Sent,
                ));

                self.session = self
                    .session
                    .as_ref()
                    .map(|session| Sessions::record_exchange(session, &reply));
                self.status = PipelineStatus::Sent;
            }
            Err(err) => {
                tracing::error!(error = %err, "exchange failed");
                self.retry_target =
                    self.set_message_status(&exchange.message_id, MessageStatus::Failed);

                let id = self.next_id();
                self.messages.push(Message::new_with_type(
                    &id,
                    Role::Assistant,
                    MessageType::Error,
                    &failure_text(&err),
                ));

                self.last_error = Some(err.to_string());
                self.status = PipelineStatus::Failed;
            }
        }

        return true;
    }

    /// Removes the failed user message and admits its text again.
    ///
    /// Returns `Ok(None)` when there is nothing to retry.
    pub fn begin_retry(&mut self) -> Result<Option<PendingExchange>, PipelineError> {
        if self.is_sending() {
            tracing::debug!("retry rejected, an exchange is already in flight");
            return Err(PipelineError::ConcurrencyRejection);
        }

        let Some(target) = self.retry_target.take() else {
            return Ok(None);
        };

        self.messages.retain(|msg| msg.id != target.id);
        return self.begin_send(&target.content).map(Some);
    }

    /// Drops every message, the session and any in-flight exchange.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.session = None;
        self.retry_target = None;
        self.last_error = None;
        self.in_flight = None;
        self.generation += 1;
        self.status = PipelineStatus::Idle;
    }
}
