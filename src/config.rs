use crate::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_TRANSLATOR_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TRANSLATOR_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Settings for the external natural-language-to-SQL service.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub translator: TranslatorConfig,
    /// Upper bound applied separately to translation and to statement execution.
    pub query_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::InternalServerError("DATABASE_URL must be set".into()))?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| AppError::InternalServerError("SERVER_PORT must be a number".into()))?;

        let query_timeout_secs: u64 = match env::var("QUERY_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| {
                AppError::InternalServerError("QUERY_TIMEOUT_SECS must be a number".into())
            })?,
            Err(_) => DEFAULT_QUERY_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url,
            server_port,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            translator: TranslatorConfig {
                base_url: env::var("TRANSLATOR_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_TRANSLATOR_BASE_URL.to_string()),
                api_key: env::var("TRANSLATOR_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env::var("TRANSLATOR_MODEL")
                    .unwrap_or_else(|_| DEFAULT_TRANSLATOR_MODEL.to_string()),
            },
            query_timeout: Duration::from_secs(query_timeout_secs),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
