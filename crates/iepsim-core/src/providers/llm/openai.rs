use super::{Decoding, LlmClient};
use crate::config::ProviderConfig;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Transport timeout. The pipeline has no retry or cancellation hook, so a
/// hung provider call must eventually fail on its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct OpenAIClient {
    pub model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(cfg: &ProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, prompt: &str, decoding: Decoding) -> anyhow::Result<LlmResponse> {
        // Credential is checked here, not at construction, so that endpoints
        // which never reach the provider stay usable without a key.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is not configured"))?;

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": decoding.temperature,
            "max_tokens": decoding.max_tokens,
        });

        let resp = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI chat API error: {}", error_text);
        }

        let json: serde_json::Value = resp.json().await?;

        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("OpenAI API response missing content"))?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "openai".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
