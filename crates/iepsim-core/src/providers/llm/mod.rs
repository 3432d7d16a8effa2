use crate::model::LlmResponse;
use async_trait::async_trait;

/// Decoding parameters for one completion call. Each endpoint pins its own
/// constants; callers never tune these per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoding {
    pub max_tokens: u32,
    pub temperature: f32,
}

pub const SCHOOL_RESPONSE_DECODING: Decoding = Decoding {
    max_tokens: 600,
    temperature: 0.3,
};

pub const SCORE_OUTCOMES_DECODING: Decoding = Decoding {
    max_tokens: 500,
    temperature: 0.2,
};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, decoding: Decoding) -> anyhow::Result<LlmResponse>;
    fn provider_name(&self) -> &'static str;
}

pub mod fake;
pub mod openai;
