use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Production endpoint of the user service.
pub const DEFAULT_API_URL: &str = "https://fvby3521oi.execute-api.ap-south-1.amazonaws.com/prod";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_URL_VAR: &str = "USER_CONSOLE_API_URL";
pub const TIMEOUT_VAR: &str = "USER_CONSOLE_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{var} must use http or https, got {scheme}")]
    UnsupportedScheme { var: &'static str, scheme: String },
    #[error("{var} is not a number of seconds ({value}): {source}")]
    InvalidTimeout {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL the `/user` resource hangs off.
    pub api_base_url: Url,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup(API_URL_VAR) {
            Some(raw) => parse_base_url(API_URL_VAR, &raw)?,
            None => parse_base_url(API_URL_VAR, DEFAULT_API_URL)?,
        };

        let request_timeout = lookup(TIMEOUT_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|source| ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value: raw.clone(),
                        source,
                    })
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_base_url,
            request_timeout,
        })
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        var,
        value: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            var,
            scheme: other.to_string(),
        }),
    }
}
