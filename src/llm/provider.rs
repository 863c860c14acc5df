use std::sync::Arc;

use async_trait::async_trait;
use crate::config::LLMConfig;
use crate::types::{AppResult, LLMProvider, LLMRequest, LLMResponse};

/// A completion service the analyzer can talk to
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

pub struct LLM {
    adapter: Arc<dyn LLMAdapter>,
    provider: LLMProvider,
}

impl LLM {
    /// Build the adapter for the configured provider.
    ///
    /// Every supported provider speaks the OpenAI chat-completions dialect,
    /// so they differ only in base URL.
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let adapter = crate::llm::openai::OpenAIAdapter::with_api_base(
            &config.api_key,
            &config.base_url,
            config.timeout(),
        )?;

        Ok(Self {
            adapter: Arc::new(adapter),
            provider: config.provider,
        })
    }

    pub fn with_adapter(adapter: Arc<dyn LLMAdapter>, provider: LLMProvider) -> Self {
        Self { adapter, provider }
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}
