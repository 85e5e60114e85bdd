//! Client configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::common_passwords::{install_common_passwords, CommonPasswords, CommonPasswordsError};

pub const API_URL_ENV: &str = "DNP_API_URL";
pub const SEARCH_DEBOUNCE_ENV: &str = "DNP_SEARCH_DEBOUNCE_MS";
pub const REQUEST_TIMEOUT_ENV: &str = "DNP_REQUEST_TIMEOUT_SECS";
pub const COMMON_PASSWORDS_PATH_ENV: &str = "DNP_COMMON_PASSWORDS_PATH";

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_COMMON_PASSWORDS_PATH: &str = "./assets/common-passwords.txt";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
    #[error("API URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
}

/// Settings shared by the API client, search widgets and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, without trailing slash.
    pub api_base_url: String,
    /// Debounce delay applied to search inputs.
    pub search_debounce: Duration,
    pub request_timeout: Duration,
    pub common_passwords_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            common_passwords_path: PathBuf::from(DEFAULT_COMMON_PASSWORDS_PATH),
        }
    }
}

impl ClientConfig {
    /// Reads the configuration, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match std::env::var(API_URL_ENV) {
            Ok(url) => normalize_base_url(&url)?,
            Err(_) => DEFAULT_API_URL.to_string(),
        };
        let debounce_ms = read_u64(SEARCH_DEBOUNCE_ENV, DEFAULT_SEARCH_DEBOUNCE_MS)?;
        let timeout_secs = read_u64(REQUEST_TIMEOUT_ENV, DEFAULT_REQUEST_TIMEOUT_SECS)?;
        // reqwest fails every request immediately on a zero timeout
        if timeout_secs == 0 {
            return Err(ConfigError::Zero {
                var: REQUEST_TIMEOUT_ENV,
            });
        }
        let common_passwords_path = std::env::var(COMMON_PASSWORDS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_COMMON_PASSWORDS_PATH));

        Ok(Self {
            api_base_url,
            search_debounce: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            common_passwords_path,
        })
    }

    /// Reads the list at `common_passwords_path` and installs it for
    /// registration checks. Returns the number of entries.
    pub fn load_common_passwords(&self) -> Result<usize, CommonPasswordsError> {
        CommonPasswords::from_path(&self.common_passwords_path).map(install_common_passwords)
    }

    /// Joins an API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(url.to_string()));
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn read_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}
