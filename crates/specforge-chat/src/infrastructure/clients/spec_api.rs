#[cfg(test)]
#[path = "spec_api_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SpecClient;
use crate::domain::models::SpecResponse;

pub const GENERATE_SPEC_PATH: &str = "/api/v2/generate-spec";
const GENERIC_FAILURE: &str = "Failed to generate response";

#[derive(Serialize)]
struct GenerateSpecRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct ApiEnvelope {
    success: Option<Value>,
    data: Option<Value>,
    spec: Option<Value>,
    error: Option<Value>,
    message: Option<Value>,
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    return value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string);
}

impl ApiEnvelope {
    fn rejected(&self) -> bool {
        return self.success.as_ref().and_then(Value::as_bool) == Some(false);
    }

    fn explanation(&self) -> Option<String> {
        return non_empty_str(self.error.as_ref()).or_else(|| non_empty_str(self.message.as_ref()));
    }

    fn payload(&mut self) -> Option<Value> {
        return self
            .data
            .take()
            .filter(|data| !data.is_null())
            .or_else(|| self.spec.take().filter(|spec| !spec.is_null()));
    }
}

/// HTTP client for the specification generation endpoint.
pub struct SpecApiClient {
    url: String,
    timeout: String,
}

impl Default for SpecApiClient {
    fn default() -> SpecApiClient {
        SpecApiClient {
            url: Config::get(ConfigKey::ApiUrl),
            timeout: Config::get(ConfigKey::Timeout),
        }
    }
}

impl SpecApiClient {
    pub fn new(url: &str, timeout: &str) -> SpecApiClient {
        return SpecApiClient {
            url: url.trim_end_matches('/').to_string(),
            timeout: timeout.to_string(),
        };
    }

    fn endpoint(&self) -> String {
        return format!("{}{}", self.url.trim_end_matches('/'), GENERATE_SPEC_PATH);
    }

    fn timeout(&self) -> Result<Duration> {
        let millis = self
            .timeout
            .parse::<u64>()
            .with_context(|| format!("Invalid timeout '{}'", self.timeout))?;
        return Ok(Duration::from_millis(millis));
    }
}

#[async_trait]
impl SpecClient for SpecApiClient {
    async fn generate_spec(&self, prompt: &str) -> Result<SpecResponse> {
        if self.url.is_empty() {
            anyhow::bail!("Spec API URL is not defined");
        }

        let res = reqwest::Client::new()
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .timeout(self.timeout()?)
            .json(&GenerateSpecRequest { prompt })
            .send()
            .await;

        let response = match res {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = ?err, "spec API is not reachable");
                return Err(err.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;
        let envelope = serde_json::from_str::<ApiEnvelope>(&body);

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "spec API returned an error status");
            let explanation = envelope
                .ok()
                .and_then(|envelope| envelope.explanation())
                .or_else(|| status.canonical_reason().map(|reason| reason.to_string()))
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Ok(SpecResponse::Error(explanation));
        }

        let mut envelope = envelope.context("Spec API returned malformed JSON")?;
        let payload = envelope.payload();
        match (envelope.rejected(), payload) {
            (true, _) | (_, None) => {
                tracing::warn!(success = ?envelope.success, "spec API response has no specification");
                let explanation = envelope
                    .explanation()
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                return Ok(SpecResponse::Error(explanation));
            }
            (false, Some(payload)) => {
                return Ok(SpecResponse::Ok(payload));
            }
        }
    }
}
