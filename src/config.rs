//! Configuration types.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default model used when `GEMINI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default endpoint base when `GEMINI_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Remote inference configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Service credential. `None` means every remote call is skipped.
    pub api_key: Option<SecretString>,
    /// Model name inserted into the endpoint path.
    pub model: String,
    /// Endpoint base, without trailing slash.
    pub api_base: String,
    /// Bound on the whole request.
    pub request_timeout: Duration,
    /// Bound on establishing the connection.
    pub connect_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    pub llm: LlmConfig,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Pause before substituting a canned reply after a failed reply call.
    pub fallback_delay: Duration,
    /// Maximum number of jobs processed at the same time.
    pub max_concurrent_jobs: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            fallback_delay: Duration::from_millis(100),
            max_concurrent_jobs: 16,
        }
    }
}

impl TriageConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset keys fall
    /// back to defaults; set but unparseable keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("GEMINI_API_KEY").map(SecretString::from);
        let model = get("GEMINI_MODEL").unwrap_or(defaults.llm.model);
        let api_base = get("GEMINI_API_BASE")
            .map(|b| b.trim_end_matches('/').to_string())
            .unwrap_or(defaults.llm.api_base);

        let request_timeout = parse_or(&get, "MAIL_TRIAGE_REQUEST_TIMEOUT_SECS", 15u64)?;
        let connect_timeout = parse_or(&get, "MAIL_TRIAGE_CONNECT_TIMEOUT_SECS", 5u64)?;
        let fallback_delay_ms = parse_or(&get, "MAIL_TRIAGE_FALLBACK_DELAY_MS", 100u64)?;
        let max_concurrent_jobs = parse_or(&get, "MAIL_TRIAGE_MAX_CONCURRENT_JOBS", 16usize)?;
        if max_concurrent_jobs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAIL_TRIAGE_MAX_CONCURRENT_JOBS".into(),
                message: "must be at least 1".into(),
            });
        }

        let host = get("MAIL_TRIAGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&get, "MAIL_TRIAGE_PORT", 8000u16)?;
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "MAIL_TRIAGE_HOST".into(),
                    message: format!("{e}"),
                })?;

        Ok(Self {
            llm: LlmConfig {
                api_key,
                model,
                api_base,
                request_timeout: Duration::from_secs(request_timeout),
                connect_timeout: Duration::from_secs(connect_timeout),
            },
            bind_addr,
            fallback_delay: Duration::from_millis(fallback_delay_ms),
            max_concurrent_jobs,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}
