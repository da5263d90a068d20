use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str = "https://genai.softnix.ai/external/api/chat-messages";

#[derive(Clone)]
pub struct Config {
    /// HTTP bind host (e.g., 0.0.0.0)
    pub app_host: String,
    /// HTTP bind port (e.g., 8000)
    pub app_port: u16,

    /// Bearer token for the upstream. Sent empty when unset.
    pub api_key: Option<String>,
    /// Full URL of the upstream chat-messages endpoint
    pub upstream_url: Url,
    /// Skip certificate validation for the upstream. Off unless asked for.
    pub upstream_insecure_tls: bool,
    /// Whole-request timeout for the upstream call. `None` waits forever.
    pub upstream_timeout: Option<Duration>,
    /// Answer with the upstream's status code instead of a flat 200. Off by default.
    pub forward_upstream_status: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Invalid bool for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` is this over `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let app_port = parse_or_default::<u16, _>(&lookup, "APP_PORT", 8000)?;

        let api_key = lookup("API_KEY");

        let upstream_url = match lookup("UPSTREAM_URL") {
            Some(raw) => Url::parse(&raw).map_err(|_| ConfigError::InvalidUrl {
                name: "UPSTREAM_URL",
                value: raw,
            })?,
            None => Url::parse(DEFAULT_UPSTREAM_URL).map_err(|_| ConfigError::InvalidUrl {
                name: "UPSTREAM_URL",
                value: DEFAULT_UPSTREAM_URL.to_string(),
            })?,
        };

        let upstream_insecure_tls = parse_bool_or_default(&lookup, "UPSTREAM_INSECURE_TLS", false)?;
        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(v.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidNumber {
                    name: "UPSTREAM_TIMEOUT_SECS",
                    value: v,
                }
            })?)),
            None => None,
        };
        let forward_upstream_status =
            parse_bool_or_default(&lookup, "FORWARD_UPSTREAM_STATUS", false)?;

        Ok(Self {
            app_host,
            app_port,
            api_key,
            upstream_url,
            upstream_insecure_tls,
            upstream_timeout,
            forward_upstream_status,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_host", &self.app_host)
            .field("app_port", &self.app_port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("upstream_url", &self.upstream_url.as_str())
            .field("upstream_insecure_tls", &self.upstream_insecure_tls)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("forward_upstream_status", &self.forward_upstream_status)
            .finish()
    }
}

/* --------------------------- helpers --------------------------- */

fn parse_or_default<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v.trim().parse::<T>().map_err(|_| ConfigError::InvalidNumber {
            name: key,
            value: v,
        }),
        None => Ok(default),
    }
}

fn parse_bool_or_default<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "y" => Ok(true),
            "0" | "false" | "no" | "n" => Ok(false),
            _ => Err(ConfigError::InvalidBool {
                name: key,
                value: v,
            }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8000");
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.upstream_url.as_str(), DEFAULT_UPSTREAM_URL);
        assert!(!cfg.upstream_insecure_tls);
        assert_eq!(cfg.upstream_timeout, None);
        assert!(!cfg.forward_upstream_status);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = load(&[
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "9090"),
            ("API_KEY", "secret"),
            ("UPSTREAM_URL", "http://localhost:4000/chat-messages"),
            ("UPSTREAM_INSECURE_TLS", "yes"),
            ("UPSTREAM_TIMEOUT_SECS", "30"),
            ("FORWARD_UPSTREAM_STATUS", "1"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr(), "127.0.0.1:9090");
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.upstream_url.as_str(), "http://localhost:4000/chat-messages");
        assert!(cfg.upstream_insecure_tls);
        assert_eq!(cfg.upstream_timeout, Some(Duration::from_secs(30)));
        assert!(cfg.forward_upstream_status);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("APP_PORT", "eighty")]),
            Err(ConfigError::InvalidNumber { name: "APP_PORT", .. })
        ));
        assert!(matches!(
            load(&[("UPSTREAM_URL", "not a url")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            load(&[("UPSTREAM_INSECURE_TLS", "maybe")]),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert!(matches!(
            load(&[("UPSTREAM_TIMEOUT_SECS", "-1")]),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let cfg = load(&[("API_KEY", "super-secret-token")]).unwrap();
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("super-secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}
