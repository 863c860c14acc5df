//! Static File Serving
//!
//! Serves the browser front end from the configured static directory.
//! When no `index.html` is present, `/` returns a small page describing the API.

use std::path::{Path, PathBuf};

use axum::{
    Router,
    routing::get,
    extract::State,
    response::{Html, IntoResponse},
};
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Create router for serving static files
pub fn router(static_dir: &Path) -> Router {
    if static_dir.is_dir() {
        info!(path = %static_dir.display(), "Serving static files");
    } else {
        warn!(path = %static_dir.display(), "Static files directory not found, serving API only");
    }

    let serve_dir = ServeDir::new(static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/", get(serve_index))
        .with_state(static_dir.to_path_buf())
        .fallback_service(serve_dir)
}

async fn serve_index(State(static_dir): State<PathBuf>) -> impl IntoResponse {
    match tokio::fs::read_to_string(static_dir.join("index.html")).await {
        Ok(content) => Html(content),
        Err(_) => Html(FALLBACK_HTML.to_string()),
    }
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Quote Lens</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 760px;
            margin: 0 auto;
            padding: 40px 20px;
            color: #222;
        }
        code { background: #f0f0f0; padding: 2px 6px; border-radius: 4px; }
        pre { background: #f6f6f6; padding: 15px; border-radius: 6px; overflow-x: auto; }
    </style>
</head>
<body>
    <h1>Quote Lens</h1>
    <p>The API is running. No front end was found in the static directory.</p>

    <h3>Endpoints</h3>
    <ul>
        <li><code>POST /api/analyze</code> - Analyze up to two quotes</li>
        <li><code>GET /api/health</code> - Health check</li>
    </ul>

    <h4>Example:</h4>
    <pre>curl -X POST http://localhost:3000/api/analyze \
  -H "Content-Type: application/json" \
  -d '{"quotes": ["The only way out is through."]}'</pre>
</body>
</html>"#;
