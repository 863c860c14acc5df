// Shared helpers for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::analysis::QuoteAnalyzer;
use crate::config::Config;
use crate::llm::{LLMAdapter, LLM};
use crate::models::AppState;
use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse};

/// Canned behaviour for one completion call
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    NoContent,
    Fail(String),
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }
}

/// Deterministic completion service. Picks the first reply whose key occurs
/// in the user message, otherwise the default.
pub struct StubAdapter {
    default: Reply,
    replies: Vec<(String, Reply)>,
    calls: AtomicUsize,
    requests: Mutex<Vec<LLMRequest>>,
}

impl StubAdapter {
    pub fn new(default: Reply) -> Self {
        Self {
            default,
            replies: Vec::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(mut self, key: &str, reply: Reply) -> Self {
        self.replies.push((key.to_string(), reply));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMAdapter for StubAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let user_message = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let reply = self
            .replies
            .iter()
            .find(|(key, _)| user_message.contains(key.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default);

        match reply {
            Reply::Text(text) => Ok(LLMResponse {
                content: Some(text.clone()),
                finish_reason: Some("stop".to_string()),
                usage: None,
            }),
            Reply::NoContent => Ok(LLMResponse {
                content: None,
                finish_reason: Some("stop".to_string()),
                usage: None,
            }),
            Reply::Fail(message) => Err(AppError::LLMApi(message.clone())),
        }
    }
}

pub fn stub_analyzer(adapter: Arc<dyn LLMAdapter>) -> QuoteAnalyzer {
    QuoteAnalyzer::new(LLM::with_adapter(adapter, LLMProvider::Custom), "test-model")
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STATIC_DIR" => Some("target/nonexistent-static".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn stub_state(adapter: Arc<dyn LLMAdapter>) -> AppState {
    AppState::new(stub_analyzer(adapter), test_config())
}
