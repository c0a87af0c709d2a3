use std::sync::Arc;

use serde_json::json;

use super::cache::{cache_key, EtymologyCache};
use super::upstream::{GenerationRequest, TextGenerator, UpstreamError};
use crate::protocol::{ErrorCode, JsonRpcError};

/// Reply for an input with no word in it.
pub const NO_WORD_REPLY: &str = "No word provided.";

/// Sampling temperature for every upstream call.
pub const TEMPERATURE: f32 = 0.2;

/// Fixed instructions sent with every upstream call.
pub const ETYMOLOGY_INSTRUCTIONS: &str = "\
You are an expert in etymology and word origins.

Provide a concise etymology (2-5 sentences) for the word provided to you.

Rules:
- Pick the first word if more than one word or a sentence is provided.
- If it's a historical word: include origin language(s), meaning of components, and approximate entry into English.
- If the word is a modern coined term, product name, brand, or company (e.g., \"Facebook\", \"GitHub\"):
    - Explain it as a coined / compound / invented term, not ancient etymology.
- If it is an acronym (e.g., \"NASA\", \"FIFA\"):
    - Expand the acronym and give founding context instead of linguistic etymology.
- If it's a portmanteau (e.g., \"brunch\", \"motel\"):
    - Explain the blended roots.
- If the origin is unknown: say it's uncertain or debated. Do NOT fabricate details.

Keep the answer factual, concise, and clear. Avoid speculation.";

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Failed to fetch etymology: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("Model returned empty response.")]
    EmptyResponse,
}

impl LookupError {
    /// Short message for the JSON-RPC `error.message` field.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Upstream(_) => "Failed to fetch etymology.",
            Self::EmptyResponse => "Model returned empty response.",
        }
    }

    /// Wire form: always INTERNAL_ERROR, with the full text in `data.detail`
    /// and the upstream cause, when there is one, in `data.error`.
    pub fn to_rpc_error(&self) -> JsonRpcError {
        let data = match self {
            Self::Upstream(cause) => json!({ "detail": self.to_string(), "error": cause.to_string() }),
            Self::EmptyResponse => json!({ "detail": self.to_string() }),
        };
        JsonRpcError::new(ErrorCode::InternalError, self.summary()).with_data(Some(data))
    }
}

/// Cached etymology lookups backed by a [`TextGenerator`].
pub struct EtymologyService {
    cache: EtymologyCache,
    generator: Arc<dyn TextGenerator>,
}

impl EtymologyService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_cache(generator, EtymologyCache::new())
    }

    pub fn with_cache(generator: Arc<dyn TextGenerator>, cache: EtymologyCache) -> Self {
        Self { cache, generator }
    }

    pub fn cache(&self) -> &EtymologyCache {
        &self.cache
    }

    /// Etymology for the first word of `text`.
    ///
    /// A cache hit never reaches the generator. A miss makes exactly one
    /// generator call and, on success, one cache write. The cache lock is not
    /// held across the call, so concurrent misses on one key may both call
    /// upstream.
    pub async fn lookup(&self, text: &str) -> Result<String, LookupError> {
        let key = match cache_key(text) {
            Some(key) => key,
            None => return Ok(NO_WORD_REPLY.to_string()),
        };

        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(word = %key, "etymology cache hit");
            return Ok(hit);
        }

        tracing::info!(word = %key, "etymology cache miss, querying model");
        let req = GenerationRequest {
            instructions: ETYMOLOGY_INSTRUCTIONS.to_string(),
            temperature: TEMPERATURE,
            input: text.to_string(),
        };

        let output = self.generator.generate(&req).await.map_err(|e| {
            tracing::warn!(word = %key, error = %e, "etymology lookup failed");
            LookupError::from(e)
        })?;

        let etymology = output.trim();
        if etymology.is_empty() {
            tracing::warn!(word = %key, "model returned empty response");
            return Err(LookupError::EmptyResponse);
        }

        let etymology = etymology.to_string();
        self.cache.insert(key, etymology.clone()).await;
        Ok(etymology)
    }
}
