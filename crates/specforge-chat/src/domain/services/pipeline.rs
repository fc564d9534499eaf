use super::ChatState;
use super::PipelineStatus;
use crate::domain::models::ChatSession;
use crate::domain::models::Message;
use crate::domain::models::PendingExchange;
use crate::domain::models::SpecClientBox;
use crate::errors::PipelineError;

/// Drives exchanges against a [`SpecClient`](crate::domain::models::SpecClient).
///
/// `send` and `retry` borrow the pipeline mutably across the endpoint call, which is
/// their only suspension point, so direct callers can never interleave two exchanges.
pub struct RequestPipeline {
    client: SpecClientBox,
    state: ChatState,
}

impl RequestPipeline {
    pub fn new(client: SpecClientBox) -> RequestPipeline {
        return RequestPipeline {
            client,
            state: ChatState::new(),
        };
    }

    pub fn state(&self) -> &ChatState {
        return &self.state;
    }

    pub fn messages(&self) -> &[Message] {
        return self.state.messages();
    }

    pub fn session(&self) -> Option<&ChatSession> {
        return self.state.session();
    }

    pub fn status(&self) -> PipelineStatus {
        return self.state.status();
    }

    pub fn retry_target(&self) -> Option<&Message> {
        return self.state.retry_target();
    }

    pub fn last_error(&self) -> Option<&str> {
        return self.state.last_error();
    }

    async fn run(&mut self, pending: PendingExchange) {
        tracing::info!(
            message_id = %pending.message_id,
            generation = pending.generation,
            "sending prompt"
        );
        let outcome = self.client.generate_spec(&pending.prompt).await;
        self.state.complete(pending.complete(outcome));
        tracing::info!(status = %self.state.status(), "exchange finished");
    }

    /// Sends `text` and waits for the reply.
    ///
    /// Endpoint failures do not surface here: they leave the pipeline `Failed` with an
    /// explanation message. Only validation and concurrency rejections are returned.
    pub async fn send(&mut self, text: &str) -> Result<(), PipelineError> {
        let pending = self.state.begin_send(text)?;
        self.run(pending).await;

        return Ok(());
    }

    /// Resubmits the most recent failed message. No-op when nothing failed.
    pub async fn retry(&mut self) -> Result<(), PipelineError> {
        if let Some(pending) = self.state.begin_retry()? {
            self.run(pending).await;
        }

        return Ok(());
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }
}
