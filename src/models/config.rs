//! Configuration for the Detoxify mediator
//!
//! Loaded once at start-up from the environment and shared read-only.
//! Defaults live in utils/constants.rs.

use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    is_groq_key, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROVIDER_TIMEOUT_SECS,
    GROQ_DEFAULT_BASE_URL, GROQ_DEFAULT_MAX_TOKENS, GROQ_DEFAULT_MODEL, GROQ_DEFAULT_TEMPERATURE,
};

/// Settings for the Groq provider tier
#[derive(Clone)]
pub struct ProviderConfig {
    /// Process-wide default key. Never logged.
    pub default_api_key: Option<String>,
    /// OpenAI-compatible base URL
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bound on one provider attempt
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_api_key: None,
            base_url: GROQ_DEFAULT_BASE_URL.to_string(),
            model: GROQ_DEFAULT_MODEL.to_string(),
            temperature: GROQ_DEFAULT_TEMPERATURE,
            max_tokens: GROQ_DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("default_api_key", &self.default_api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Read `GROQ_*` and `DETOX_PROVIDER_TIMEOUT_SECS` from the environment
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_api_key: Self::get_groq_key(),
            base_url: env_string("GROQ_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: env_string("GROQ_MODEL").unwrap_or(defaults.model),
            temperature: env_parse("GROQ_TEMPERATURE", defaults.temperature),
            max_tokens: env_parse("GROQ_MAX_TOKENS", defaults.max_tokens),
            timeout: Duration::from_secs(env_parse(
                "DETOX_PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )),
        }
    }

    /// Get the default Groq key from the environment.
    /// The key itself is never logged.
    fn get_groq_key() -> Option<String> {
        let key = env_string("GROQ_API_KEY")?;
        if !is_groq_key(&key) {
            warn!("GROQ_API_KEY does not look like a Groq key; the provider will likely reject it");
        }
        info!("🔑 GROQ_API_KEY configured (key hidden for security)");
        Some(key)
    }

    pub fn has_default_key(&self) -> bool {
        self.default_api_key.is_some()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.is_empty() {
            return Err(AppError::invalid_config("GROQ_BASE_URL must not be empty"));
        }
        if self.model.is_empty() {
            return Err(AppError::invalid_config("GROQ_MODEL must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::invalid_config(format!(
                "GROQ_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(AppError::invalid_config("GROQ_MAX_TOKENS must be positive"));
        }
        if self.timeout.is_zero() {
            return Err(AppError::invalid_config(
                "DETOX_PROVIDER_TIMEOUT_SECS must be positive",
            ));
        }
        Ok(())
    }
}

/// Configuration for the whole mediator service
#[derive(Debug, Clone)]
pub struct MediatorConfig {
    pub host: String,
    pub port: u16,
    pub provider: ProviderConfig,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            provider: ProviderConfig::default(),
        }
    }
}

impl MediatorConfig {
    /// Load from the environment. Hosting platforms set `PORT`,
    /// `DETOX_PORT` is the local override.
    pub fn from_env() -> Self {
        let port = env_port("PORT")
            .or_else(|| env_port("DETOX_PORT"))
            .unwrap_or(DEFAULT_PORT);

        Self {
            host: env_string("DETOX_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            provider: ProviderConfig::from_env(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.host.is_empty() {
            return Err(AppError::invalid_config("DETOX_HOST must not be empty"));
        }
        self.provider.validate()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Non-empty, trimmed environment value
fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Port from `name`, `None` when unset or unparseable
fn env_port(name: &str) -> Option<u16> {
    let raw = env_string(name)?;
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!(variable = name, value = %raw, "Invalid port, ignoring");
            None
        }
    }
}

/// Parse an environment value, falling back to `default` with a warning
fn env_parse<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env_string(name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Unparseable value, using default {}", default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MediatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 5000);
        assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
        assert!(!config.provider.has_default_key());
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut config = ProviderConfig::default();
        config.temperature = 3.5;
        let err = config.validate().unwrap_err();
        assert_eq!(err.code_str(), "CFG_INVALID_VALUE");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = ProviderConfig::default();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ProviderConfig {
            default_api_key: Some("gsk_topsecret".to_string()),
            ..ProviderConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("topsecret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_from_env() {
        // All environment mutation lives in this one test
        let vars = [
            ("GROQ_API_KEY", "   "),
            ("GROQ_BASE_URL", "http://localhost:9999/v1/"),
            ("GROQ_MODEL", "llama-3.1-8b-instant"),
            ("GROQ_TEMPERATURE", "warm"),
            ("GROQ_MAX_TOKENS", "256"),
            ("DETOX_PROVIDER_TIMEOUT_SECS", "-3"),
            ("DETOX_HOST", "0.0.0.0"),
            ("PORT", "nope"),
            ("DETOX_PORT", "6000"),
        ];
        for (name, value) in vars {
            std::env::set_var(name, value);
        }

        let config = MediatorConfig::from_env();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 6000);
        assert!(!config.provider.has_default_key());
        assert_eq!(config.provider.base_url, "http://localhost:9999/v1");
        assert_eq!(config.provider.model, "llama-3.1-8b-instant");
        assert_eq!(config.provider.temperature, 0.4);
        assert_eq!(config.provider.max_tokens, 256);
        assert_eq!(config.provider.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());

        std::env::set_var("PORT", "8080");
        std::env::set_var("GROQ_API_KEY", "gsk_fromenv");
        let config = MediatorConfig::from_env();
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider.default_api_key.as_deref(), Some("gsk_fromenv"));

        std::env::remove_var("PORT");
        std::env::set_var("DETOX_PORT", "70000");
        assert_eq!(MediatorConfig::from_env().port, 5000);

        for (name, _) in vars {
            std::env::remove_var(name);
        }
    }

    #[tokio::test]
    async fn test_bind_addr_accepts_hostname() {
        let config = MediatorConfig {
            host: "localhost".to_string(),
            port: 0,
            ..MediatorConfig::default()
        };
        assert_eq!(config.bind_addr(), "localhost:0");
        let listener = tokio::net::TcpListener::bind(config.bind_addr()).await;
        assert!(listener.is_ok());
    }
}
