//! Session configuration parsed from environment variables.

use crate::error::ConfigError;
use crate::guard::{DEFAULT_HOME_ROUTE, DEFAULT_LOGIN_ROUTE, GuardRoutes};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TOKEN_COOKIE: &str = "token";
pub const DEFAULT_USER_STORAGE_KEY: &str = "user";
pub const DEFAULT_TOKEN_MAX_AGE_DAYS: u32 = 7;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// What to do with a validation result that lands after a logout or login
/// already replaced the credential it was checking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaleResultPolicy {
    /// Last write wins.
    #[default]
    Apply,
    /// Drop results from superseded credentials.
    Discard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub api_base_url: String,
    /// Cookie holding the bearer token in browsers.
    pub token_cookie: String,
    /// `localStorage` key holding the cached profile in browsers.
    pub user_storage_key: String,
    pub token_max_age_days: u32,
    pub request_timeout_secs: u64,
    pub routes: GuardRoutes,
    pub stale_results: StaleResultPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_cookie: DEFAULT_TOKEN_COOKIE.to_owned(),
            user_storage_key: DEFAULT_USER_STORAGE_KEY.to_owned(),
            token_max_age_days: DEFAULT_TOKEN_MAX_AGE_DAYS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            routes: GuardRoutes::default(),
            stale_results: StaleResultPolicy::Apply,
        }
    }
}

impl SessionConfig {
    /// Build config from process environment variables.
    ///
    /// All optional:
    /// - `AJARIN_API_BASE_URL`: default `http://localhost:5000/api`
    /// - `AJARIN_TOKEN_COOKIE`: default `token`
    /// - `AJARIN_USER_STORAGE_KEY`: default `user`
    /// - `AJARIN_TOKEN_MAX_AGE_DAYS`: default 7
    /// - `AJARIN_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AJARIN_LOGIN_ROUTE`: default `/login`
    /// - `AJARIN_HOME_ROUTE`: default `/dashboard`
    /// - `AJARIN_STALE_VALIDATION`: `apply` (default) or `discard`
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric or enum variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with an injectable source.
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric or enum variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let api_base_url = get("AJARIN_API_BASE_URL", DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let token_max_age_days = parse_number(
            "AJARIN_TOKEN_MAX_AGE_DAYS",
            lookup("AJARIN_TOKEN_MAX_AGE_DAYS"),
            DEFAULT_TOKEN_MAX_AGE_DAYS,
        )?;
        let request_timeout_secs = parse_number(
            "AJARIN_REQUEST_TIMEOUT_SECS",
            lookup("AJARIN_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let stale_results = parse_stale_policy(lookup("AJARIN_STALE_VALIDATION").as_deref())?;

        Ok(Self {
            api_base_url,
            token_cookie: get("AJARIN_TOKEN_COOKIE", DEFAULT_TOKEN_COOKIE),
            user_storage_key: get("AJARIN_USER_STORAGE_KEY", DEFAULT_USER_STORAGE_KEY),
            token_max_age_days,
            request_timeout_secs,
            routes: GuardRoutes {
                login: get("AJARIN_LOGIN_ROUTE", DEFAULT_LOGIN_ROUTE),
                home: get("AJARIN_HOME_ROUTE", DEFAULT_HOME_ROUTE),
            },
            stale_results,
        })
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var,
            value: value.to_owned(),
        }),
    }
}

/// Parse a `StaleResultPolicy` name.
///
/// # Errors
///
/// Returns an error for anything other than `apply` or `discard`.
pub fn parse_stale_policy(raw: Option<&str>) -> Result<StaleResultPolicy, ConfigError> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "apply") => Ok(StaleResultPolicy::Apply),
        Some("discard") => Ok(StaleResultPolicy::Discard),
        Some(other) => Err(ConfigError::Invalid {
            var: "AJARIN_STALE_VALIDATION",
            value: other.to_owned(),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
