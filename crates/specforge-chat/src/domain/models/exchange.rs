use anyhow::Result;

use super::SpecResponse;

/// An exchange that has been admitted by the chat state and is waiting on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    pub generation: u64,
    pub message_id: String,
    pub prompt: String,
}

/// The endpoint's answer to a [`PendingExchange`], tagged with the same generation.
#[derive(Debug)]
pub struct CompletedExchange {
    pub generation: u64,
    pub message_id: String,
    pub outcome: Result<SpecResponse>,
}

impl PendingExchange {
    pub fn complete(self, outcome: Result<SpecResponse>) -> CompletedExchange {
        return CompletedExchange {
            generation: self.generation,
            message_id: self.message_id,
            outcome,
        };
    }
}
