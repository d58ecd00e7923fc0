//! Optional `config.toml` settings.
//!
//! ```toml
//! # Point at a GitHub Enterprise instance
//! api_base_url = "https://github.example.com/api/v3"
//! # Whole-request timeout for API calls and downloads
//! http_timeout_secs = 600
//! ```
//!
//! Every key is optional. A missing file means defaults.

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT};
use crate::core::{PuffError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// GitHub REST API base URL
    pub api_base_url: String,
    /// Timeout for a whole HTTP request, in seconds
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// [`PuffError::ConfigError`] if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await.map_err(|e| PuffError::ConfigError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;

        Self::parse(&content).map_err(|message| PuffError::ConfigError {
            message: format!("failed to parse {}: {message}", path.display()),
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let settings: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if settings.http_timeout_secs == 0 {
            return Err("http_timeout_secs must be greater than zero".to_string());
        }
        Ok(settings)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
