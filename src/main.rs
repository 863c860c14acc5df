use tokio::net::TcpListener;
use tracing::{info, warn};
use quote_lens::{
    analysis::QuoteAnalyzer,
    config::Config,
    llm::LLM,
    routes::create_router,
    types::LLMProvider,
    utils::init_logger,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    let _log_guard = init_logger(&config.logging);
    info!("Configuration loaded: {:?}", config.server);
    info!("LLM configuration: {:?}", config.llm);

    if !config.llm.has_api_key() && config.llm.provider != LLMProvider::Custom {
        warn!(provider = %config.llm.provider, "No LLM API key configured, every analysis will fail");
    }

    // One completion client for the whole process
    let llm = LLM::from_config(&config.llm)?;
    let analyzer = QuoteAnalyzer::new(llm, config.llm.model.clone());

    let state = AppState::new(analyzer, config.clone());
    let app = create_router(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
