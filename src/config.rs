//! Client configuration: API base URL and persisted-session storage keys.
//!
//! The API base can be overridden at build time with `CHAT_API_BASE`; the
//! bundle has no runtime environment to read from.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const USER_STORAGE_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every REST endpoint, without a trailing slash.
    pub api_base: String,
    /// `localStorage` key holding the raw bearer token.
    pub token_key: String,
    /// `localStorage` key holding the JSON-serialized user record.
    pub user_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            token_key: TOKEN_STORAGE_KEY.to_owned(),
            user_key: USER_STORAGE_KEY.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from values baked in at compile time.
    ///
    /// Optional:
    /// - `CHAT_API_BASE`: REST prefix, default `/api`
    pub fn from_build_env() -> Self {
        Self::with_api_base(option_env!("CHAT_API_BASE"))
    }

    /// Default config with an optional API base override. Blank values fall
    /// back to [`DEFAULT_API_BASE`].
    pub fn with_api_base(raw: Option<&str>) -> Self {
        Self { api_base: parse_api_base(raw), ..Self::default() }
    }

    pub fn login_endpoint(&self) -> String {
        format!("{}/login", self.api_base)
    }

    pub fn register_endpoint(&self) -> String {
        format!("{}/register", self.api_base)
    }

    pub fn current_user_endpoint(&self) -> String {
        format!("{}/users/me", self.api_base)
    }
}

fn parse_api_base(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_owned()
    } else {
        trimmed.to_owned()
    }
}
