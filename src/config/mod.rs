//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `RELEVANCE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_TIMEOUT_SECS,
    DEFAULT_REDDIT_BASE_URL, DEFAULT_REDDIT_TIMEOUT_SECS, DEFAULT_REDDIT_USER_AGENT,
};

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, ANSI-coloured when writing to a terminal.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "console" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RELEVANCE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// OpenAI-compatible API root, including `/v1`.
    pub llm_base_url: String,

    /// Bearer token for the LLM API. Local servers usually need none.
    pub llm_api_key: Option<String>,

    pub embedding_model: String,

    /// Model used for relevance explanations.
    pub chat_model: String,

    pub llm_timeout: Duration,

    pub reddit_base_url: String,

    pub reddit_user_agent: String,

    pub reddit_timeout: Duration,

    /// Upper bound on one evaluation run. `None` disables the deadline.
    pub request_timeout: Option<Duration>,

    /// Filter directive used when `RUST_LOG` is unset. Default: `info`.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Append logs to this file instead of stdout.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            llm_api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            reddit_base_url: DEFAULT_REDDIT_BASE_URL.to_string(),
            reddit_user_agent: DEFAULT_REDDIT_USER_AGENT.to_string(),
            reddit_timeout: Duration::from_secs(DEFAULT_REDDIT_TIMEOUT_SECS),
            request_timeout: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            log_file: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "RELEVANCE_PORT";
    const ENV_BIND_ADDR: &'static str = "RELEVANCE_BIND_ADDR";
    const ENV_LLM_BASE_URL: &'static str = "RELEVANCE_LLM_BASE_URL";
    const ENV_LLM_API_KEY: &'static str = "RELEVANCE_LLM_API_KEY";
    const ENV_EMBEDDING_MODEL: &'static str = "RELEVANCE_EMBEDDING_MODEL";
    const ENV_CHAT_MODEL: &'static str = "RELEVANCE_CHAT_MODEL";
    const ENV_LLM_TIMEOUT: &'static str = "RELEVANCE_LLM_TIMEOUT_SECS";
    const ENV_REDDIT_BASE_URL: &'static str = "RELEVANCE_REDDIT_BASE_URL";
    const ENV_REDDIT_USER_AGENT: &'static str = "RELEVANCE_REDDIT_USER_AGENT";
    const ENV_REDDIT_TIMEOUT: &'static str = "RELEVANCE_REDDIT_TIMEOUT_SECS";
    const ENV_REQUEST_TIMEOUT: &'static str = "RELEVANCE_REQUEST_TIMEOUT_SECS";
    const ENV_LOG_LEVEL: &'static str = "RELEVANCE_LOG_LEVEL";
    const ENV_LOG_FORMAT: &'static str = "RELEVANCE_LOG_FORMAT";
    const ENV_LOG_FILE: &'static str = "RELEVANCE_LOG_FILE";

    /// Every variable [`Config::from_env`] reads.
    pub const ENV_VARS: [&'static str; 14] = [
        Self::ENV_PORT,
        Self::ENV_BIND_ADDR,
        Self::ENV_LLM_BASE_URL,
        Self::ENV_LLM_API_KEY,
        Self::ENV_EMBEDDING_MODEL,
        Self::ENV_CHAT_MODEL,
        Self::ENV_LLM_TIMEOUT,
        Self::ENV_REDDIT_BASE_URL,
        Self::ENV_REDDIT_USER_AGENT,
        Self::ENV_REDDIT_TIMEOUT,
        Self::ENV_REQUEST_TIMEOUT,
        Self::ENV_LOG_LEVEL,
        Self::ENV_LOG_FORMAT,
        Self::ENV_LOG_FILE,
    ];

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let llm_base_url = Self::parse_string_from_env(Self::ENV_LLM_BASE_URL, defaults.llm_base_url);
        let llm_api_key = Self::parse_optional_string_from_env(Self::ENV_LLM_API_KEY);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let chat_model = Self::parse_string_from_env(Self::ENV_CHAT_MODEL, defaults.chat_model);
        let llm_timeout = Self::parse_secs_from_env(Self::ENV_LLM_TIMEOUT)?
            .unwrap_or(defaults.llm_timeout);
        let reddit_base_url =
            Self::parse_string_from_env(Self::ENV_REDDIT_BASE_URL, defaults.reddit_base_url);
        let reddit_user_agent =
            Self::parse_string_from_env(Self::ENV_REDDIT_USER_AGENT, defaults.reddit_user_agent);
        let reddit_timeout = Self::parse_secs_from_env(Self::ENV_REDDIT_TIMEOUT)?
            .unwrap_or(defaults.reddit_timeout);
        let request_timeout = Self::parse_secs_from_env(Self::ENV_REQUEST_TIMEOUT)?
            .filter(|d| !d.is_zero());
        let log_level = Self::parse_string_from_env(Self::ENV_LOG_LEVEL, defaults.log_level);
        let log_format = match Self::parse_optional_string_from_env(Self::ENV_LOG_FORMAT) {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };
        let log_file = Self::parse_optional_string_from_env(Self::ENV_LOG_FILE).map(PathBuf::from);

        Ok(Self {
            port,
            bind_addr,
            llm_base_url,
            llm_api_key,
            embedding_model,
            chat_model,
            llm_timeout,
            reddit_base_url,
            reddit_user_agent,
            reddit_timeout,
            request_timeout,
            log_level,
            log_format,
            log_file,
        })
    }

    /// Validates URLs and required names (performs no I/O).
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_url(Self::ENV_LLM_BASE_URL, &self.llm_base_url)?;
        Self::require_url(Self::ENV_REDDIT_BASE_URL, &self.reddit_base_url)?;
        Self::require_non_empty(Self::ENV_EMBEDDING_MODEL, &self.embedding_model)?;
        Self::require_non_empty(Self::ENV_CHAT_MODEL, &self.chat_model)?;
        Self::require_non_empty(Self::ENV_REDDIT_USER_AGENT, &self.reddit_user_agent)?;
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn require_non_empty(name: &'static str, value: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyValue { name });
        }
        Ok(())
    }

    fn require_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
        Self::require_non_empty(name, value)?;
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                name,
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_secs_from_env(var_name: &'static str) -> Result<Option<Duration>, ConfigError> {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => value
                .parse::<u64>()
                .map(|secs| Some(Duration::from_secs(secs)))
                .map_err(|_| ConfigError::InvalidDuration {
                    name: var_name,
                    value,
                }),
            None => Ok(None),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }
}
