//! Environment-driven client configuration

use std::env;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_LEETCODE_BASE_URL: &str = "https://leetcode.com";
const DEFAULT_CODEFORCES_BASE_URL: &str = "https://codeforces.com";

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub leetcode_handle: String,
  pub codeforces_handle: String,
  pub leetcode_base_url: String,
  pub codeforces_base_url: String,
}

impl ClientConfig {
  /// Load from the environment, reading a `.env` file first if one is
  /// present. Handles are required; base URLs override the production
  /// endpoints only when set.
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    Ok(Self {
      leetcode_handle: env::var("CONTEST_LOG_LEETCODE_HANDLE")
        .map_err(|_| ConfigError::MissingConfig("CONTEST_LOG_LEETCODE_HANDLE".into()))?,
      codeforces_handle: env::var("CONTEST_LOG_CODEFORCES_HANDLE")
        .map_err(|_| ConfigError::MissingConfig("CONTEST_LOG_CODEFORCES_HANDLE".into()))?,
      leetcode_base_url: env::var("CONTEST_LOG_LEETCODE_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_LEETCODE_BASE_URL.to_string()),
      codeforces_base_url: env::var("CONTEST_LOG_CODEFORCES_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_CODEFORCES_BASE_URL.to_string()),
    })
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
