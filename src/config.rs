use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 20;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} missing")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub timezone: String,
}

impl Config {
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            timezone: "UTC".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("API_BASE_URL"))?;
        let api_base_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::Invalid {
            key: "API_BASE_URL",
            reason: e.to_string(),
        })?;

        let mut config = Self::new(api_base_url);

        if let Some(secs) = parse_secs(&lookup, "POLL_INTERVAL_SECS")? {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_secs(&lookup, "REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw_tz) = lookup("APP_TIMEZONE") {
            config.timezone = crate::domain::format::normalize_timezone(&raw_tz).ok_or_else(|| {
                ConfigError::Invalid {
                    key: "APP_TIMEZONE",
                    reason: format!("unknown timezone '{raw_tz}'"),
                }
            })?;
        }

        Ok(config)
    }
}

fn parse_secs<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key,
                reason: format!("expected whole seconds, got '{raw}'"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must be greater than zero".to_string(),
                });
            }
            Ok(Some(secs))
        }
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
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("API_BASE_URL", "https://api.example.com")])).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(20));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn test_missing_base_url() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_BASE_URL")));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://localhost:8080"),
            ("POLL_INTERVAL_SECS", "5"),
            ("APP_TIMEZONE", "Europe/Kiev"),
        ]))
        .unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.timezone, "Europe/Kyiv");
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://localhost:8080"),
            ("POLL_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "POLL_INTERVAL_SECS", .. }));
    }
}
