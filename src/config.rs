use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::LLMProvider;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
}

#[derive(Clone)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
}

// Keep the credential out of startup logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LLMConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider: LLMProvider = var("LLM_PROVIDER")
            .unwrap_or_else(|| "openai".to_string())
            .parse()?;

        let base_url = match var("LLM_BASE_URL") {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => provider
                .default_base_url()
                .map(str::to_string)
                .context("LLM_BASE_URL must be set when LLM_PROVIDER=custom")?,
        };

        Ok(Self {
            server: ServerConfig {
                port: match var("PORT") {
                    Some(port) => port.parse().context("PORT must be a valid port number")?,
                    None => DEFAULT_PORT,
                },
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                cors_allowed_origins: var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|| "*".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                static_dir: PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| "public".to_string())),
            },
            llm: LLMConfig {
                provider,
                api_key: var("LLM_API_KEY")
                    .or_else(|| var("OPENAI_API_KEY"))
                    .unwrap_or_default(),
                base_url,
                model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout_secs: match var("LLM_TIMEOUT_SECS") {
                    Some(secs) => {
                        let secs: u64 = secs
                            .parse()
                            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;
                        anyhow::ensure!(secs > 0, "LLM_TIMEOUT_SECS must be greater than zero");
                        secs
                    }
                    None => DEFAULT_TIMEOUT_SECS,
                },
            },
            logging: LoggingConfig {
                log_dir: var("LOG_DIR").map(PathBuf::from),
            },
        })
    }
}
