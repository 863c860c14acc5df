use axum::{
    Router,
    routing::post,
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::MAX_QUOTES_PER_REQUEST;
use crate::models::{AnalyzeRequest, AnalyzeResponse, AppState, ErrorResponse, INVALID_QUOTES};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_quotes))
        .with_state(state)
}

/// POST /api/analyze - Analyze up to two quotes
///
/// The body is read raw so that every malformed shape, including non-JSON,
/// maps to the same 400 response.
pub async fn analyze_quotes(State(state): State<AppState>, body: Bytes) -> Response {
    let quotes = match parse_quotes(&body) {
        Ok(quotes) => quotes,
        Err(e) => {
            warn!(error = %e, "Rejected analyze request");
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(INVALID_QUOTES))).into_response();
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id, quotes = quotes.len());

    let results = async {
        info!("Analyzing quotes");
        let results = state.analyzer.analyze_batch(quotes).await;
        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!(results = results.len(), failed, "Analysis complete");
        results
    }
    .instrument(span)
    .await;

    (StatusCode::OK, Json(AnalyzeResponse { results })).into_response()
}

/// Missing, non-array or empty `quotes` is rejected. Only the retained
/// quotes have to be strings; anything past the cap is never inspected.
fn parse_quotes(body: &[u8]) -> AppResult<Vec<String>> {
    let mut request: AnalyzeRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    if request.quotes.is_empty() {
        return Err(AppError::InvalidRequest("quotes is empty".to_string()));
    }

    request.quotes.truncate(MAX_QUOTES_PER_REQUEST);
    request
        .quotes
        .into_iter()
        .enumerate()
        .map(|(i, quote)| match quote {
            serde_json::Value::String(text) => Ok(text),
            other => Err(AppError::InvalidRequest(format!(
                "quote {} is not a string: {}",
                i, other
            ))),
        })
        .collect()
}
