use std::path::PathBuf;

use crate::error::{MeetlensError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const API_URL_ENV: &str = "MEETLENS_API_URL";
pub const USER_ID_ENV: &str = "MEETLENS_USER_ID";
pub const ACCESS_TOKEN_ENV: &str = "MEETLENS_ACCESS_TOKEN";

/// Where the analysis backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read `MEETLENS_API_URL`, falling back to the local backend.
    pub fn from_env() -> Self {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn analysis_url(&self, media_id: &str) -> String {
        format!("{}/media/{}/analysis", self.api_url, media_id)
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api_url)
    }
}

/// Read a required variable, naming it in the error when unset.
pub fn require_env(env_var: &str) -> Result<String> {
    std::env::var(env_var).map_err(|_| MeetlensError::MissingConfig {
        env_var: env_var.to_string(),
    })
}

/// Directory exports land in when none is given.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
