//! Stored authentication credentials
//!
//! Credentials live in `~/.outreach/auth.json` with owner-only permissions.
//! The file is camelCase JSON: `{"accessToken", "apiUrl", "email"}`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Stored authentication credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// JWT access token
    pub access_token: String,
    /// API server URL the token was issued for
    pub api_url: String,
    /// User email
    pub email: String,
}

/// Get the path to the auth credentials file
pub fn credentials_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ApiError::CredentialStore("could not determine home directory".into()))?;
    Ok(home.join(".outreach").join("auth.json"))
}

/// Save credentials to the default auth file
pub fn save_credentials(credentials: &Credentials) -> Result<()> {
    save_credentials_at(&credentials_path()?, credentials)
}

/// Load credentials from the default auth file, `None` when not logged in
pub fn load_credentials() -> Result<Option<Credentials>> {
    load_credentials_at(&credentials_path()?)
}

/// Clear stored credentials (logout)
pub fn clear_credentials() -> Result<()> {
    clear_credentials_at(&credentials_path()?)
}

/// Save credentials to an explicit path
pub fn save_credentials_at(path: &Path, credentials: &Credentials) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(store_err)?;
    }

    let json = serde_json::to_string_pretty(credentials)
        .map_err(|e| ApiError::CredentialStore(e.to_string()))?;
    fs::write(path, json).map_err(store_err)?;

    // Owner read/write only - the file holds a bearer token
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).map_err(store_err)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).map_err(store_err)?;
    }

    Ok(())
}

/// Load credentials from an explicit path
pub fn load_credentials_at(path: &Path) -> Result<Option<Credentials>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(store_err(e)),
    };
    let credentials =
        serde_json::from_str(&contents).map_err(|e| ApiError::CredentialStore(e.to_string()))?;
    Ok(Some(credentials))
}

/// Remove the credentials file at an explicit path (a no-op when absent)
pub fn clear_credentials_at(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(store_err(e)),
    }
}

fn store_err(e: std::io::Error) -> ApiError {
    ApiError::CredentialStore(e.to_string())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
