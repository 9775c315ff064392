//! Configuration management for vibecheck.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/vibecheck/.env`)
//! 4. Application defaults for everything that is not a secret
//!
//! The configuration is read once at startup into a [`Config`] record which
//! is then shared read-only by every request.

use std::{env, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5001";
pub const DEFAULT_APP_URL: &str = "http://localhost:5001";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5001/callback";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_LOGOUT_URL: &str = "https://accounts.spotify.com/logout";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Runtime configuration shared by all handlers.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    /// Public base URL of this app, used as the logout `continue` target.
    pub app_url: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub spotify_api_url: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
    pub spotify_logout_url: String,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub openai_model: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset, so a blank line copied from
    /// `.env.example` is reported as missing instead of silently used.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            app_url: or_default("APP_URL", DEFAULT_APP_URL),
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            spotify_redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            spotify_api_url: or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            spotify_auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            spotify_token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            spotify_logout_url: or_default("SPOTIFY_LOGOUT_URL", DEFAULT_SPOTIFY_LOGOUT_URL),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_api_url: or_default("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            openai_model: or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
        })
    }

    /// URL of the entry page, with a trailing slash.
    pub fn entry_url(&self) -> String {
        format!("{}/", self.app_url.trim_end_matches('/'))
    }
}

/// Loads environment variables from `.env` files.
///
/// Tries the current working directory first, then the local data directory:
/// - Linux: `~/.local/share/vibecheck/.env`
/// - macOS: `~/Library/Application Support/vibecheck/.env`
/// - Windows: `%LOCALAPPDATA%/vibecheck/.env`
///
/// Variables already present in the environment are never overwritten.
/// Missing files are fine; a file that exists but cannot be parsed is an
/// error.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or a
/// present `.env` file is malformed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("vibecheck/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}
