// Quote Lens - LLM-backed quote analysis service

pub mod config;
pub mod types;
pub mod llm;
pub mod analysis;  // Prompting, parsing and validation of quote analyses
pub mod models;
pub mod routes;
pub mod middleware;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
