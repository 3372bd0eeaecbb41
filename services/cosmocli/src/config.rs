use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Selects how the console dialog loop classifies utterances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassifierKind {
    Heuristic,
    Llm,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub server_port: u16,
    pub request_timeout: Duration,
    pub classifier: ClassifierKind,
    pub openai_api_key: Option<String>,
    pub chat_model: String,
    pub log_level: Level,
    pub prompts_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let server_address = std::env::var("COSMO_SERVER_ADDRESS")
            .map_err(|_| ConfigError::MissingVar("COSMO_SERVER_ADDRESS".to_string()))?;

        let server_port_str = std::env::var("COSMO_SERVER_PORT")
            .map_err(|_| ConfigError::MissingVar("COSMO_SERVER_PORT".to_string()))?;
        let server_port = server_port_str.parse::<u16>().map_err(|e| {
            ConfigError::InvalidValue("COSMO_SERVER_PORT".to_string(), e.to_string())
        })?;

        let timeout_str =
            std::env::var("COSMO_REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|e| {
            ConfigError::InvalidValue("COSMO_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "COSMO_REQUEST_TIMEOUT_SECS".to_string(),
                "timeout must be at least one second".to_string(),
            ));
        }
        let request_timeout = Duration::from_secs(timeout_secs);

        let classifier_str =
            std::env::var("COSMO_CLASSIFIER").unwrap_or_else(|_| "heuristic".to_string());
        let classifier = match classifier_str.to_lowercase().as_str() {
            "llm" => ClassifierKind::Llm,
            _ => ClassifierKind::Heuristic,
        };

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./prompts"));

        if classifier == ClassifierKind::Llm && openai_api_key.is_none() {
            return Err(ConfigError::MissingVar(
                "OPENAI_API_KEY must be set for the 'llm' classifier".to_string(),
            ));
        }

        Ok(Self {
            server_address,
            server_port,
            request_timeout,
            classifier,
            openai_api_key,
            chat_model,
            log_level,
            prompts_path,
        })
    }

    /// The base URL of the home agent server.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server_address, self.server_port)
    }
}
