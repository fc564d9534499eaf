//! Chat message pipeline for the specforge backend specification generator.
//!
//! This crate turns user prompts into generated backend specifications: it sends
//! prompts to the generation endpoint, tracks per-message delivery status, keeps a
//! lightweight session summary, supports retrying failed exchanges, and splits
//! message text into prose and fenced code blocks for display.

pub mod configuration;
pub mod domain;
pub mod errors;
pub mod infrastructure;
pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Action, ChatSession, CompletedExchange, ContentBlock, Event, Message, MessageStatus,
    MessageType, PendingExchange, Role, SpecClient, SpecClientBox, SpecResponse,
};
pub use domain::services::{
    format_spec_response, tokenize, ActionsService, ChatState, PipelineStatus, RequestPipeline,
    Sessions,
};
pub use errors::PipelineError;
pub use infrastructure::clients::SpecApiClient;
