use std::sync::Arc;

use crate::analysis::{AnalysisResult, QuoteAnalyzer};
use crate::config::Config;

/// Message returned when the request body carries no usable quotes
pub const INVALID_QUOTES: &str = "Please provide an array of quotes.";

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<QuoteAnalyzer>,
    pub config: Config,
}

impl AppState {
    pub fn new(analyzer: QuoteAnalyzer, config: Config) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            config,
        }
    }
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct AnalyzeRequest {
    /// Elements are checked only after the batch is truncated
    pub quotes: Vec<serde_json::Value>,
}

#[derive(Debug, serde::Serialize)]
pub struct AnalyzeResponse {
    pub results: Vec<AnalysisResult>,
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub provider: String,
    pub model: String,
    pub api_key_configured: bool,
}
