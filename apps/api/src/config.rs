use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_TEMPERATURE: f32 = 0.4;
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            anthropic_api_key: require(&lookup, "ANTHROPIC_API_KEY")?,
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_temperature: parse_or(&lookup, "LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            llm_max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            port: parse_or(&lookup, "PORT", 8080u16)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied_when_only_api_key_set() {
        let config = Config::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.anthropic_api_key, "sk-test");
        assert_eq!(config.llm_model, DEFAULT_MODEL);
        assert!((config.llm_temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.llm_max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("LLM_MODEL", "claude-haiku-4-5"),
            ("LLM_TEMPERATURE", "0.9"),
            ("PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.llm_model, "claude-haiku-4-5");
        assert!((config.llm_temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }
}
