//! Error taxonomy of the request pipeline.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Outbound text was blank; nothing was sent.
    #[error("Message text is empty")]
    Validation,
    /// A send or retry arrived while an exchange was already in flight.
    #[error("An exchange is already in flight")]
    ConcurrencyRejection,
    /// The endpoint could not be reached or answered with unreadable data.
    #[error("{0}")]
    Transport(String),
    /// The endpoint answered with an error payload or without a specification.
    #[error("{0}")]
    Application(String),
}

