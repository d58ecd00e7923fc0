//! GitHub personal access token storage.
//!
//! The token is optional. Without one, requests are anonymous and subject to
//! GitHub's lower rate limit. `PUFF_GITHUB_TOKEN` takes precedence over the
//! `gh_pat` file so CI jobs never need to write credentials to disk.

use crate::constants::ENV_GITHUB_TOKEN;
use crate::core::{PuffError, Result};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Permissions of the token file on Unix: owner read/write only.
pub const TOKEN_FILE_MODE: u32 = 0o600;

/// Read the token file. A missing file is an empty token.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if the file exists but cannot be read.
pub async fn read_token_file(path: &Path) -> Result<String> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(content.trim().to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(PuffError::persistence("read token", path, e)),
    }
}

/// Store a token with [`TOKEN_FILE_MODE`] permissions.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if the write or chmod fails.
pub async fn write_token_file(path: &Path, token: &str) -> Result<()> {
    fs::write(path, token.trim()).await.map_err(|e| PuffError::persistence("write token", path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(TOKEN_FILE_MODE))
            .await
            .map_err(|e| PuffError::persistence("set permissions on", path, e))?;
    }

    Ok(())
}

/// The token to use: `$PUFF_GITHUB_TOKEN` if set and non-empty, else the file.
///
/// # Errors
///
/// See [`read_token_file`].
pub async fn resolve_token(token_file: &Path) -> Result<String> {
    if let Ok(token) = std::env::var(ENV_GITHUB_TOKEN) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }
    read_token_file(token_file).await
}
