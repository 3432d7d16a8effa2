use super::{Decoding, LlmClient};
use crate::model::LlmResponse;
use async_trait::async_trait;

/// Canned client for tests and offline runs: every completion returns the
/// same text, whatever the prompt.
#[derive(Clone)]
pub struct FakeClient {
    pub text: String,
}

impl FakeClient {
    pub fn returning(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, _prompt: &str, _decoding: Decoding) -> anyhow::Result<LlmResponse> {
        Ok(LlmResponse {
            text: self.text.clone(),
            provider: "fake".to_string(),
            model: "fake".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Client whose provider call always fails, for exercising transport-error
/// reporting.
pub struct FailingClient;

#[async_trait]
impl LlmClient for FailingClient {
    async fn complete(&self, _prompt: &str, _decoding: Decoding) -> anyhow::Result<LlmResponse> {
        anyhow::bail!("connection refused")
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}
