use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::kernel::ai::RETRY_MAX_DELAY;

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub completion_timeout: Duration,
    pub completion_max_retries: u32,
    /// Upper bound for one classification's completion step, covering every
    /// retry attempt and the backoff between them.
    pub completion_deadline: Duration,
    pub allowed_origins: Vec<String>,
    pub strict_status_vocabulary: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("completion_timeout", &self.completion_timeout)
            .field("completion_max_retries", &self.completion_max_retries)
            .field("completion_deadline", &self.completion_deadline)
            .field("allowed_origins", &self.allowed_origins)
            .field("strict_status_vocabulary", &self.strict_status_vocabulary)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => bail!("{} must be set", name),
            }
        };

        let allowed_origins: Vec<String> = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8000)?;
        let openai_api_key = required("OPENAI_API_KEY")?;
        let openai_base_url = required("OPENAI_BASE_URL")?;

        let temperature: f32 = parse_or(&lookup, "COMPLETION_TEMPERATURE", 0.3)?;
        if !temperature.is_finite() {
            bail!("COMPLETION_TEMPERATURE must be a finite number, got {}", temperature);
        }

        let completion_timeout =
            Duration::from_secs(parse_or(&lookup, "COMPLETION_TIMEOUT_SECS", 30)?);
        let completion_max_retries = parse_or(&lookup, "COMPLETION_MAX_RETRIES", 0)?;
        let completion_deadline = completion_deadline(completion_timeout, completion_max_retries)
            .with_context(|| {
                format!(
                    "COMPLETION_TIMEOUT_SECS ({}) and COMPLETION_MAX_RETRIES ({}) give a deadline that overflows",
                    completion_timeout.as_secs(),
                    completion_max_retries
                )
            })?;

        Ok(Self {
            host,
            port,
            openai_api_key,
            openai_base_url,
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
            temperature,
            max_tokens: parse_or(&lookup, "COMPLETION_MAX_TOKENS", 500)?,
            completion_timeout,
            completion_max_retries,
            completion_deadline,
            allowed_origins,
            strict_status_vocabulary: parse_flag(&lookup, "STRICT_STATUS_VOCABULARY")?,
        })
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `timeout` per attempt plus the longest backoff between attempts.
/// `None` when the sum does not fit in a `Duration`.
fn completion_deadline(timeout: Duration, max_retries: u32) -> Option<Duration> {
    let attempts = max_retries.checked_add(1)?;
    let backoff = RETRY_MAX_DELAY.checked_mul(max_retries)?;
    timeout.checked_mul(attempts)?.checked_add(backoff)
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, name: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => bail!("{} must be a boolean, got {:?}", name, v),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", "https://api.example.com/v1"),
    ];

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.openai_model, "gpt-4");
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.completion_timeout, Duration::from_secs(30));
        assert_eq!(config.completion_max_retries, 0);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert!(!config.strict_status_vocabulary);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("OPENAI_BASE_URL", "https://x")]))
            .unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn blank_base_url_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "   "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OPENAI_BASE_URL"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((
            "ALLOWED_ORIGINS",
            "http://localhost:3000, chrome-extension://abc ,",
        ));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "chrome-extension://abc"]
        );
    }

    #[test]
    fn strict_flag_parses_common_spellings() {
        for (raw, expected) in [("true", true), ("1", true), ("off", false), ("FALSE", false)] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push(("STRICT_STATUS_VOCABULARY", raw));
            let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
            assert_eq!(config.strict_status_vocabulary, expected, "{raw}");
        }
    }

    #[test]
    fn deadline_covers_all_attempts() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("COMPLETION_TIMEOUT_SECS", "10"));
        pairs.push(("COMPLETION_MAX_RETRIES", "2"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.completion_deadline, Duration::from_secs(10 * 3 + 8 * 2));
    }

    #[test]
    fn default_deadline_is_single_timeout() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.completion_deadline, Duration::from_secs(30));
    }

    #[test]
    fn overflowing_deadline_is_an_error() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("COMPLETION_TIMEOUT_SECS", "18446744073709551615"));
        pairs.push(("COMPLETION_MAX_RETRIES", "1"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("COMPLETION_TIMEOUT_SECS"));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("COMPLETION_MAX_RETRIES", "4294967295"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("COMPLETION_MAX_RETRIES"));
    }

    #[test]
    fn non_finite_temperature_is_an_error() {
        for raw in ["NaN", "inf", "-inf"] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push(("COMPLETION_TEMPERATURE", raw));
            let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(err.to_string().contains("COMPLETION_TEMPERATURE"), "{raw}");
        }
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-test"));
        assert!(rendered.contains("<redacted>"));
    }
}
