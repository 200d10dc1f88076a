//! Configuration management for songlist.
//!
//! Values are read from environment variables, which are seeded from a `.env`
//! file in the local data directory at startup:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Defaults, for the few optional settings that have one

use std::{env, path::PathBuf};

/// Loads environment variables from `<data_local_dir>/songlist/.env`.
///
/// Creates the directory if it does not exist yet. Variables that are
/// already present in the process environment are not overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/songlist/.env`
/// - macOS: `~/Library/Application Support/songlist/.env`
/// - Windows: `%LOCALAPPDATA%/songlist/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file cannot be read or parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    Ok(())
}

/// Returns the application's local data directory, `<data_local_dir>/songlist`.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songlist");
    path
}

fn required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", key)),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`),
/// e.g. `127.0.0.1:8888`.
pub fn server_addr() -> Result<String, String> {
    required("SERVER_ADDRESS")
}

/// Client ID of the registered Spotify application
/// (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Redirect URI registered for the Spotify application
/// (`SPOTIFY_API_REDIRECT_URI`). Must point at the callback server.
pub fn spotify_redirect_uri() -> Result<String, String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Scopes requested during authorization (`SPOTIFY_API_AUTH_SCOPE`).
///
/// Writing to a playlist needs `playlist-modify-public` and/or
/// `playlist-modify-private`.
pub fn spotify_scope() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_SCOPE")
}

/// Spotify's authorization endpoint (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_URL")
}

/// Base URL of the Spotify Web API (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> Result<String, String> {
    required("SPOTIFY_API_URL")
}

/// Token exchange and refresh endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> Result<String, String> {
    required("SPOTIFY_API_TOKEN_URL")
}

/// Playlist that receives the compiled songlist (`SPOTIFY_PLAYLIST_ID`).
pub fn spotify_playlist_id() -> Result<String, String> {
    required("SPOTIFY_PLAYLIST_ID")
}

/// Market used to filter release listings (`SPOTIFY_MARKET`). Unset means
/// the provider decides from the user's account.
pub fn spotify_market() -> Option<String> {
    optional("SPOTIFY_MARKET")
}
