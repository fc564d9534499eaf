use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Validated answer from the specification endpoint.
///
/// Whatever JSON the endpoint returns is collapsed into one of these two shapes
/// before it reaches the chat state. Transport failures are reported through the
/// `Err` side of [`SpecClient::generate_spec`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecResponse {
    Ok(Value),
    Error(String),
}

#[async_trait]
pub trait SpecClient: Send + Sync {
    async fn generate_spec(&self, prompt: &str) -> Result<SpecResponse>;
}

pub type SpecClientBox = Box<dyn SpecClient>;
