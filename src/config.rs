//! Service configuration, read once from the environment at startup.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::generator::GeneratorConfig;
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmConfig};
use crate::mail::{DEFAULT_FROM, MailConfig};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SMTP_PORT: u16 = 587;
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Backend settings; `None` when no API key is configured.
    pub llm: Option<LlmConfig>,
    pub generator: GeneratorConfig,
    /// SMTP settings; `None` unless both `SMTP_HOST` and `EMAIL_TO` are set.
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// Build config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("BRAND_KIT_PORT").or_else(|| get("PORT")) {
            Some(raw) => parse_value("BRAND_KIT_PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let temperature: f32 = match get("BRAND_KIT_TEMPERATURE") {
            Some(raw) => parse_value("BRAND_KIT_TEMPERATURE", &raw)?,
            None => GeneratorConfig::default().temperature,
        };
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                key: "BRAND_KIT_TEMPERATURE".into(),
                message: format!("{temperature} is outside 0.0..=2.0"),
            });
        }

        let timeout = match get("BRAND_KIT_GENERATION_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_value("BRAND_KIT_GENERATION_TIMEOUT_SECS", &raw)?),
            None => GeneratorConfig::default().timeout,
        };

        let generator = GeneratorConfig {
            temperature,
            timeout,
            ..GeneratorConfig::default()
        };

        let llm = get("OPENAI_API_KEY").map(|key| LlmConfig {
            api_key: SecretString::from(key),
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout: timeout,
        });

        let mail = match (get("SMTP_HOST"), get("EMAIL_TO")) {
            (Some(smtp_host), Some(to_address)) => Some(MailConfig {
                smtp_host,
                smtp_port: match get("SMTP_PORT") {
                    Some(raw) => parse_value("SMTP_PORT", &raw)?,
                    None => DEFAULT_SMTP_PORT,
                },
                username: get("SMTP_USER"),
                password: get("SMTP_PASS"),
                from_address: get("EMAIL_FROM").unwrap_or_else(|| DEFAULT_FROM.to_string()),
                to_address,
            }),
            _ => None,
        };

        Ok(Self {
            port,
            llm,
            generator,
            mail,
        })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}
