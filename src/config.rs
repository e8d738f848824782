//! # Harness Configuration
//!
//! Where the API lives and how long to wait for it. Values come from the
//! environment, with defaults that point at the public v4 API:
//!
//! | variable | default |
//! |---|---|
//! | `SPACEX_API_BASE_URL` | `https://api.spacexdata.com` |
//! | `SPACEX_API_VERSION` | `v4` |
//! | `SPACEX_API_TIMEOUT_SECS` | `30` |
//!
//! A variable that is set but empty or malformed is an error rather than a silent
//! fallback to the default.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "SPACEX_API_BASE_URL";
pub const API_VERSION_ENV: &str = "SPACEX_API_VERSION";
pub const TIMEOUT_ENV: &str = "SPACEX_API_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be valid UTF-8")]
    NotUnicode(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{name} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("{name} must be a positive integer number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub base_url: String,
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Headers sent with every request.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spacexdata.com".to_string(),
            api_version: "v4".to_string(),
            timeout: 30,
            default_headers: BTreeMap::from([(
                "accept".to_string(),
                "application/json".to_string(),
            )]),
        }
    }
}

impl HarnessConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(std::env::var_os)
    }

    /// Loads configuration from `lookup`, a stand-in for the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<OsString>,
    {
        let read = |name: &'static str| -> Result<Option<String>, ConfigError> {
            let Some(raw) = lookup(name) else {
                return Ok(None);
            };
            let value = raw
                .into_string()
                .map_err(|_| ConfigError::NotUnicode(name))?;
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
            Ok(Some(value.trim().to_string()))
        };

        let mut config = Self::default();
        if let Some(base_url) = read(BASE_URL_ENV)? {
            if !is_base_url(&base_url) {
                return Err(ConfigError::InvalidUrl {
                    name: BASE_URL_ENV,
                    value: base_url,
                });
            }
            config.base_url = base_url;
        }
        if let Some(version) = read(API_VERSION_ENV)? {
            config.api_version = version;
        }
        if let Some(raw) = read(TIMEOUT_ENV)? {
            config.timeout = match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: TIMEOUT_ENV,
                        value: raw,
                    })
                }
            };
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// `base_url/api_version`, without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{version}")
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

/// An absolute http(s) URL with a host and no query or fragment.
fn is_base_url(value: &str) -> bool {
    reqwest::Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https")
            && url.host().is_some()
            && url.query().is_none()
            && url.fragment().is_none()
    })
}
