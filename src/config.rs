use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_MS: u64 = 20_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set; refusing to start without a completion-service credential")]
    MissingApiKey,
    #[error("FORECAST_MODE must be `structured` or `raw`, got `{0}`")]
    InvalidMode(String),
}

/// How the completion text is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Parse the completion against the forecast schema.
    #[default]
    Structured,
    /// Pass the completion text through unparsed.
    Raw,
}

impl FromStr for ResponseMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structured" => Ok(Self::Structured),
            "raw" => Ok(Self::Raw),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

pub struct AppConfig {
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub mode: ResponseMode,
}

impl AppConfig {
    /// Read configuration from the environment. A missing credential or an
    /// unrecognized response mode is fatal; everything else falls back to a
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_ms = env::var("OPENAI_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let mode = match env::var("FORECAST_MODE") {
            Ok(value) => value.parse()?,
            Err(_) => ResponseMode::default(),
        };

        Ok(Self {
            port,
            api_key,
            model,
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            mode,
        })
    }
}
