//! Player configuration from the environment
//!
//! | Variable                     | Default                       |
//! |------------------------------|-------------------------------|
//! | `FORMWALK_API_BASE_URL`      | [`DEFAULT_API_BASE_URL`]      |
//! | `FORMWALK_HTTP_TIMEOUT_SECS` | [`DEFAULT_HTTP_TIMEOUT_SECS`] |
//! | `FORMWALK_ROLL_NUMBER`       | prompt                        |
//! | `FORMWALK_NAME`              | prompt                        |
//! | `FORMWALK_SUBMISSION_PATH`   | log submissions only          |

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::infrastructure::{DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS};

pub const ENV_API_BASE_URL: &str = "FORMWALK_API_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "FORMWALK_HTTP_TIMEOUT_SECS";
pub const ENV_ROLL_NUMBER: &str = "FORMWALK_ROLL_NUMBER";
pub const ENV_NAME: &str = "FORMWALK_NAME";
pub const ENV_SUBMISSION_PATH: &str = "FORMWALK_SUBMISSION_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FORMWALK_API_BASE_URL is not a valid URL ({value}): {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("FORMWALK_API_BASE_URL must be http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("FORMWALK_HTTP_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub api_base_url: Url,
    pub http_timeout: Duration,
    /// Skips the roll number prompt when set together with `name`
    pub roll_number: Option<String>,
    pub name: Option<String>,
    /// Where to append submitted answers as JSON lines
    pub submission_path: Option<PathBuf>,
}

impl PlayerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = get(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw_url.clone(),
            source,
        })?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(
                api_base_url.scheme().to_string(),
            ));
        }

        let http_timeout = match get(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            http_timeout,
            roll_number: get(ENV_ROLL_NUMBER),
            name: get(ENV_NAME),
            submission_path: get(ENV_SUBMISSION_PATH).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<PlayerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlayerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(
            config.api_base_url.as_str(),
            "https://dynamic-form-generator-9rl7.onrender.com/"
        );
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.roll_number.is_none());
        assert!(config.submission_path.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let config = config(&[
            (ENV_API_BASE_URL, "http://localhost:8080"),
            (ENV_HTTP_TIMEOUT_SECS, "5"),
            (ENV_ROLL_NUMBER, " RA001 "),
            (ENV_NAME, "   "),
            (ENV_SUBMISSION_PATH, "out/answers.jsonl"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.roll_number.as_deref(), Some("RA001"));
        assert!(config.name.is_none());
        assert_eq!(
            config.submission_path,
            Some(PathBuf::from("out/answers.jsonl"))
        );
    }

    #[test]
    fn rejects_bad_url_scheme_and_timeout() {
        assert!(matches!(
            config(&[(ENV_API_BASE_URL, "not a url")]),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            config(&[(ENV_API_BASE_URL, "ftp://example.com")]),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            config(&[(ENV_HTTP_TIMEOUT_SECS, "0")]),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            config(&[(ENV_HTTP_TIMEOUT_SECS, "soon")]),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
