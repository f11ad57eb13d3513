use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 8192;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host, e.g. 0.0.0.0
    pub host: String,
    pub port: u16,

    pub api_key: String,
    /// Base URL of an OpenAI-compatible API. `None` uses the client's default.
    pub api_base: Option<String>,

    pub generation: GenerationSettings,
}

/// The knobs handed to every completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_completion_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("AI_INTEGRATIONS_OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("AI_INTEGRATIONS_OPENAI_API_KEY"))?;
        let api_base = lookup("AI_INTEGRATIONS_OPENAI_BASE_URL").filter(|url| !url.is_empty());

        let model = lookup("WINGMAN_MODEL")
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let max_completion_tokens = parse_or_default(
            &lookup,
            "WINGMAN_MAX_COMPLETION_TOKENS",
            DEFAULT_MAX_COMPLETION_TOKENS,
        )?;

        let host = lookup("WINGMAN_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or_default(&lookup, "WINGMAN_PORT", 5000u16)?;

        Ok(Self {
            host,
            port,
            api_key,
            api_base,
            generation: GenerationSettings {
                model,
                max_completion_tokens,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::InvalidNumber {
            name: key,
            value,
        }),
        None => Ok(default),
    }
}
