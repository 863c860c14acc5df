//! Quote Analysis
//!
//! Sends each quote to the completion service with a fixed prompt and
//! deterministic decoding parameters, then turns the model's text into a
//! validated [`QuoteAnalysis`]. Failures never escape this module: they are
//! logged and reported per quote as [`AnalysisResult::Failure`].

pub mod parser;
pub mod prompts;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::llm::LLM;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest, ResponseFormat};

pub use parser::parse_analysis;

/// Quotes analyzed per request; the rest are dropped
pub const MAX_QUOTES_PER_REQUEST: usize = 2;
/// Token ceiling for one analysis
pub const MAX_TOKENS: u32 = 200;
pub const TEMPERATURE: f32 = 0.5;
/// Message returned to callers for any per-quote failure
pub const ANALYSIS_FAILED: &str = "Failed to analyze quote";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteAnalysis {
    pub sentiment: f64,
    pub intensity: f64,
    pub complexity: f64,
    pub agency: f64,
    pub themes: Vec<String>,
}

/// Outcome for one quote, serialized as either
/// `{ "quote", "analysis" }` or `{ "quote", "error" }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Success { quote: String, analysis: QuoteAnalysis },
    Failure { quote: String, error: String },
}

impl AnalysisResult {
    pub fn quote(&self) -> &str {
        match self {
            AnalysisResult::Success { quote, .. } | AnalysisResult::Failure { quote, .. } => quote,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success { .. })
    }
}

pub struct QuoteAnalyzer {
    llm: LLM,
    model: String,
}

impl QuoteAnalyzer {
    pub fn new(llm: LLM, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn llm(&self) -> &LLM {
        &self.llm
    }

    /// Completion request for a single quote
    pub fn build_request(&self, quote: &str) -> LLMRequest {
        LLMRequest {
            model: self.model.clone(),
            messages: vec![
                LLMMessage::system(prompts::SYSTEM_PROMPT),
                LLMMessage::user(prompts::user_prompt(quote)),
            ],
            max_tokens: Some(MAX_TOKENS),
            temperature: Some(TEMPERATURE),
            response_format: ResponseFormat::JsonObject,
        }
    }

    /// One completion call plus parsing, with the underlying error kept
    pub async fn try_analyze(&self, quote: &str) -> AppResult<QuoteAnalysis> {
        let request = self.build_request(quote);
        let response = self.llm.create_chat_completion(&request).await?;

        let content = response
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(AppError::EmptyResponse)?;
        debug!(content_len = content.len(), finish_reason = ?response.finish_reason, "Received analysis text");

        parse_analysis(&content)
    }

    /// Analyze a quote, logging and swallowing any failure
    pub async fn analyze(&self, quote: &str) -> Option<QuoteAnalysis> {
        match self.try_analyze(quote).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                error!(quote_len = quote.len(), error = %e, "Error analyzing quote");
                None
            }
        }
    }

    pub async fn analyze_quote(&self, quote: String) -> AnalysisResult {
        match self.analyze(&quote).await {
            Some(analysis) => AnalysisResult::Success { quote, analysis },
            None => AnalysisResult::Failure {
                quote,
                error: ANALYSIS_FAILED.to_string(),
            },
        }
    }

    /// Analyze up to [`MAX_QUOTES_PER_REQUEST`] quotes concurrently.
    /// Results keep the input order.
    pub async fn analyze_batch(&self, mut quotes: Vec<String>) -> Vec<AnalysisResult> {
        if quotes.len() > MAX_QUOTES_PER_REQUEST {
            info!(
                received = quotes.len(),
                kept = MAX_QUOTES_PER_REQUEST,
                "Truncating quote batch"
            );
            quotes.truncate(MAX_QUOTES_PER_REQUEST);
        }

        join_all(quotes.into_iter().map(|quote| self.analyze_quote(quote))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{stub_analyzer, Reply, StubAdapter};
    use std::sync::Arc;

    const CLEAN: &str = r#"{"sentiment":0.8,"intensity":0.6,"complexity":0.4,"agency":0.7,"themes":["love","loss","hope"]}"#;

    #[test]
    fn test_build_request_parameters() {
        let analyzer = stub_analyzer(Arc::new(StubAdapter::new(Reply::NoContent)));
        let request = analyzer.build_request("To be or not to be");

        assert_eq!(request.model, "test-model");
        assert_eq!(request.max_tokens, Some(200));
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.response_format, ResponseFormat::JsonObject);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1].content.contains("To be or not to be"));
    }

    #[tokio::test]
    async fn test_analyze_clean_json() {
        let analyzer = stub_analyzer(Arc::new(StubAdapter::new(Reply::text(CLEAN))));
        let result = analyzer.analyze_quote("Hello".to_string()).await;

        let expected = AnalysisResult::Success {
            quote: "Hello".to_string(),
            analysis: QuoteAnalysis {
                sentiment: 0.8,
                intensity: 0.6,
                complexity: 0.4,
                agency: 0.7,
                themes: vec!["love".into(), "loss".into(), "hope".into()],
            },
        };
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_empty_content_fails() {
        let analyzer = stub_analyzer(Arc::new(StubAdapter::new(Reply::NoContent)));
        assert!(matches!(
            analyzer.try_analyze("x").await,
            Err(AppError::EmptyResponse)
        ));

        let analyzer = stub_analyzer(Arc::new(StubAdapter::new(Reply::text("   "))));
        assert!(analyzer.analyze("x").await.is_none());
    }

    #[tokio::test]
    async fn test_api_error_becomes_failure() {
        let analyzer = stub_analyzer(Arc::new(StubAdapter::new(Reply::Fail(
            "connection reset".to_string(),
        ))));
        let result = analyzer.analyze_quote("Hello".to_string()).await;

        assert_eq!(
            result,
            AnalysisResult::Failure {
                quote: "Hello".to_string(),
                error: "Failed to analyze quote".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_client_timeout_becomes_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let adapter = crate::llm::openai::OpenAIAdapter::with_api_base(
            "sk-test",
            &format!("http://{}", addr),
            std::time::Duration::from_millis(200),
        )
        .unwrap();
        let analyzer = stub_analyzer(Arc::new(adapter));

        let result = analyzer.analyze_quote("slow".to_string()).await;
        assert_eq!(
            result,
            AnalysisResult::Failure {
                quote: "slow".to_string(),
                error: ANALYSIS_FAILED.to_string(),
            }
        );
        server.abort();
    }

    #[tokio::test]
    async fn test_batch_truncates_and_keeps_order() {
        let adapter = Arc::new(StubAdapter::new(Reply::text(CLEAN)));
        let analyzer = stub_analyzer(adapter.clone());
        let quotes = vec!["first".to_string(), "second".to_string(), "third".to_string()];

        let results = analyzer.analyze_batch(quotes).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].quote(), "first");
        assert_eq!(results[1].quote(), "second");
        assert_eq!(adapter.call_count(), 2);
    }

    #[tokio::test]
    async fn test_batch_partial_failure() {
        let adapter = StubAdapter::new(Reply::text(CLEAN))
            .with_reply("broken", Reply::Fail("timeout".to_string()));
        let analyzer = stub_analyzer(Arc::new(adapter));

        let results = analyzer
            .analyze_batch(vec!["broken".to_string(), "fine".to_string()])
            .await;

        assert!(!results[0].is_success());
        assert!(results[1].is_success());
        assert_eq!(results[0].quote(), "broken");
    }

    #[test]
    fn test_result_serialization_shapes() {
        let success = AnalysisResult::Success {
            quote: "q".to_string(),
            analysis: QuoteAnalysis {
                sentiment: 0.5,
                intensity: 0.5,
                complexity: 0.5,
                agency: 0.5,
                themes: vec!["a".into(), "b".into(), "c".into()],
            },
        };
        let value = serde_json::to_value(&success).unwrap();
        assert_eq!(value["quote"], "q");
        assert_eq!(value["analysis"]["themes"][2], "c");
        assert!(value.get("error").is_none());

        let failure = AnalysisResult::Failure {
            quote: "q".to_string(),
            error: ANALYSIS_FAILED.to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            serde_json::json!({ "quote": "q", "error": "Failed to analyze quote" })
        );
    }
}
