//! Parsing and validation of the model's analysis text

use serde_json::Value;

use super::QuoteAnalysis;
use crate::types::{AppError, AppResult};

pub const THEME_COUNT: usize = 3;

/// Parse completion text into a validated [`QuoteAnalysis`].
pub fn parse_analysis(text: &str) -> AppResult<QuoteAnalysis> {
    let value = parse_json_lenient(text)?;
    validate(value)
}

/// Strict parse first, then retry on the span from the first `{` to the
/// last `}` so answers wrapped in commentary or code fences still parse.
pub fn parse_json_lenient(text: &str) -> AppResult<Value> {
    let strict_err = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let candidate = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => text.get(start..=end),
        _ => None,
    };

    match candidate {
        Some(json_str) => serde_json::from_str(json_str)
            .map_err(|e| AppError::InvalidJson(format!("extracted object did not parse: {}", e))),
        None => Err(AppError::InvalidJson(format!(
            "no JSON object found: {}",
            strict_err
        ))),
    }
}

fn validate(value: Value) -> AppResult<QuoteAnalysis> {
    let analysis: QuoteAnalysis =
        serde_json::from_value(value).map_err(|e| AppError::Schema(e.to_string()))?;

    let scores = [
        ("sentiment", analysis.sentiment),
        ("intensity", analysis.intensity),
        ("complexity", analysis.complexity),
        ("agency", analysis.agency),
    ];
    if let Some((name, score)) = scores
        .iter()
        .find(|(_, score)| !score.is_finite() || !(0.0..=1.0).contains(score))
    {
        return Err(AppError::Schema(format!("{} out of range: {}", name, score)));
    }

    if analysis.themes.len() != THEME_COUNT {
        return Err(AppError::Schema(format!(
            "expected {} themes, got {}",
            THEME_COUNT,
            analysis.themes.len()
        )));
    }

    Ok(analysis)
}
