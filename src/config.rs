//! Process configuration from the environment
//!
//! `.env` is loaded first when present. Parsing goes through a lookup
//! closure so tests never touch the real environment.

use crate::conversation::PickerKind;
use crate::llm::{OpenAIConfig, GROQ_CHAT_COMPLETIONS_URL};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,http://localhost:8080,http://localhost:8081,http://127.0.0.1:5173";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub provider_timeout: Duration,
    pub template_selection: PickerKind,
    pub template_seed: Option<u64>,
}

impl AppConfig {
    /// Read configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to load .env");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GROQ_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let template_selection = match get("TEMPLATE_SELECTION") {
            Some(value) => PickerKind::parse(&value).ok_or(ConfigError::Invalid {
                key: "TEMPLATE_SELECTION",
                value,
            })?,
            None => PickerKind::default(),
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url: get("GROQ_BASE_URL").unwrap_or_else(|| GROQ_CHAT_COMPLETIONS_URL.to_string()),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            allowed_origins,
            model: get("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_or(get("TEMPERATURE"), "TEMPERATURE", DEFAULT_TEMPERATURE)?,
            max_tokens: parse_or(get("MAX_TOKENS"), "MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            provider_timeout: Duration::from_secs(parse_or(
                get("PROVIDER_TIMEOUT_SECS"),
                "PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )?),
            template_selection,
            template_seed: get("TEMPLATE_SEED")
                .map(|v| parse_or(Some(v), "TEMPLATE_SEED", 0))
                .transpose()?,
        })
    }

    pub fn openai_config(&self) -> OpenAIConfig {
        OpenAIConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.provider_timeout,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("GROQ_API_KEY", "gsk_test")]).unwrap();
        assert_eq!(config.api_key, "gsk_test");
        assert_eq!(config.base_url, GROQ_CHAT_COMPLETIONS_URL);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.allowed_origins.len(), 4);
        assert_eq!(config.allowed_origins[0], "http://localhost:5173");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 800);
        assert_eq!(config.provider_timeout, Duration::from_secs(30));
        assert_eq!(config.template_selection, PickerKind::Random);
        assert_eq!(config.template_seed, None);
    }

    #[test]
    fn test_missing_api_key() {
        assert_eq!(config(&[]), Err(ConfigError::MissingApiKey));
        assert_eq!(config(&[("GROQ_API_KEY", "   ")]), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("GROQ_API_KEY", "k"),
            ("PORT", "9001"),
            ("HOST", "127.0.0.1"),
            ("ALLOWED_ORIGINS", " https://a.example , ,https://b.example,"),
            ("TEMPLATE_SELECTION", "Rotation"),
            ("TEMPLATE_SEED", "7"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.template_selection, PickerKind::Rotation);
        assert_eq!(config.template_seed, Some(7));
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert_eq!(config.host, "127.0.0.1");

        let openai = config.openai_config();
        assert_eq!(openai.api_key, "k");
        assert_eq!(openai.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config(&[("GROQ_API_KEY", "k"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid {
                key: "PORT",
                value: "eighty".to_string()
            })
        );
        assert!(matches!(
            config(&[("GROQ_API_KEY", "k"), ("TEMPLATE_SELECTION", "shuffle")]),
            Err(ConfigError::Invalid { key: "TEMPLATE_SELECTION", .. })
        ));
        assert!(matches!(
            config(&[("GROQ_API_KEY", "k"), ("TEMPERATURE", "warm")]),
            Err(ConfigError::Invalid { key: "TEMPERATURE", .. })
        ));
    }
}
