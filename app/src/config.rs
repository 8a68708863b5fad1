//! Environment configuration.

use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const API_URL_VAR: &str = "TODO_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme and host of the todo service; `/api/todos` is appended.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unusable values fall back to
    /// the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(raw) = lookup(API_URL_VAR) else {
            return Self::default();
        };
        let url = raw.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warn!(value = %raw, default = DEFAULT_API_URL, "{} is not an http(s) URL", API_URL_VAR);
            return Self::default();
        }
        Self {
            api_url: url.to_string(),
        }
    }
}
