//! Application configuration management.
//!
//! The backend base URL is read from the `AUTHKEEP_BACKEND_URL` environment
//! variable (a `.env` file is honored if present), defaulting to a local
//! development address when unset.

use std::path::PathBuf;

use anyhow::Result;

/// Application name used for config directory paths
const APP_NAME: &str = "authkeep";

/// Environment variable naming the remote auth service base URL
const BACKEND_URL_VAR: &str = "AUTHKEEP_BACKEND_URL";

/// Fallback base URL for local development
const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Token file name in the config directory
const TOKEN_FILE: &str = "token";

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
}

impl Config {
    /// Load configuration from the environment, honoring a `.env` file.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let backend_url = std::env::var(BACKEND_URL_VAR)
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self { backend_url }
    }

    /// Default location for the persisted token file.
    pub fn token_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(TOKEN_FILE))
    }
}
