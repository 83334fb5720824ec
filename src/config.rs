//! Application constants and advice-service configuration.
//!
//! The bearer credential is never embedded in source: it is resolved from
//! the environment first, then from a credentials file under the
//! user-visible app directory.

use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Arogya";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chat-completion endpoint used when `AROGYA_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model requested when `AROGYA_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Request timeout when `AROGYA_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default tracing filter for the binary.
pub fn default_log_filter() -> &'static str {
    "arogya=info,reqwest=warn"
}

/// Get the application data directory
/// ~/Arogya/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Arogya")
}

/// Credentials file consulted when `AROGYA_API_KEY` is unset.
pub fn credentials_path() -> PathBuf {
    app_data_dir().join("credentials")
}

// ═══════════════════════════════════════════
// AdviceConfig
// ═══════════════════════════════════════════

/// Connection settings for the advice service.
#[derive(Debug, Clone)]
pub struct AdviceConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Errors from configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No API key configured. Set AROGYA_API_KEY or put the key in {}", .0.display())]
    MissingApiKey(PathBuf),
}

impl AdviceConfig {
    /// Resolve configuration from the environment, falling back to the
    /// credentials file for the key and to built-in defaults for the rest.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty(std::env::var("AROGYA_API_KEY").ok())
            .or_else(|| read_credentials_file(&credentials_path()))
            .ok_or_else(|| ConfigError::MissingApiKey(credentials_path()))?;

        Ok(Self {
            api_url: non_empty(std::env::var("AROGYA_API_URL").ok())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key,
            model: non_empty(std::env::var("AROGYA_MODEL").ok())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs: std::env::var("AROGYA_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration with an explicit key and defaults for everything
    /// else. Used by tests and embedding callers.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read the bearer key from a credentials file: first non-empty line
/// that is not a `#` comment, trimmed. Returns `None` if the file is
/// missing or holds no key.
fn read_credentials_file(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
