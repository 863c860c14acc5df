use axum::{Router, routing::get, Json, extract::State};
use crate::models::{AppState, HealthResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        provider: state.analyzer.llm().provider().to_string(),
        model: state.analyzer.model().to_string(),
        api_key_configured: state.config.llm.has_api_key(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{stub_state, Reply, StubAdapter};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_model() {
        let app = router(stub_state(Arc::new(StubAdapter::new(Reply::NoContent))));
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["provider"], "custom");
        assert_eq!(value["model"], "test-model");
        assert_eq!(value["api_key_configured"], false);
    }
}
