//! Authenticated session context.
//!
//! A [`Session`] is handed explicitly to every service client; nothing about
//! authentication is global. [`SessionStore`] keeps the last login on disk so
//! CLI invocations can reuse it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Header carrying the user id on every backend request.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Bearer token and user id for one logged-in user.
#[derive(Debug)]
pub struct Session {
    user_id: String,
    token: SecretString,
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self::new(self.user_id.clone(), self.token.expose_secret())
    }
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: SecretString::from(token.into()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// `Authorization` and `X-User-Id` headers for outgoing requests.
    ///
    /// Values that are not valid header text are skipped; the backend then
    /// rejects the request as unauthenticated.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.token.expose_secret());
        if let Ok(mut value) = HeaderValue::from_str(&bearer) {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.user_id) {
            headers.insert(HeaderName::from_static(USER_ID_HEADER), value);
        }
        headers
    }
}

/// On-disk form of a session.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    user_id: String,
    access_token: String,
}

/// File-backed session cache.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Uses `~/.cache/folioview/session.json`.
    pub fn new() -> Result<Self> {
        let path = dirs::cache_dir()
            .context("Could not find cache directory")?
            .join("folioview")
            .join("session.json");
        Ok(Self { path })
    }

    /// Store the session at a custom location.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        let stored: StoredSession = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))?;

        if stored.user_id.is_empty() || stored.access_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(Session::new(stored.user_id, stored.access_token)))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session dir: {}", parent.display()))?;
        }

        let stored = StoredSession {
            user_id: session.user_id.clone(),
            access_token: session.token.expose_secret().to_string(),
        };
        let content =
            serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        restrict_permissions(&self.path)
    }

    /// Remove the cached session. Missing files are not an error.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("Failed to delete session file: {}", self.path.display())
            })?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn headers_carry_bearer_and_user_id() {
        let session = Session::new("user-42", "tok");
        let headers = session.headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get(USER_ID_HEADER).unwrap(), "user-42");
    }

    #[test]
    fn debug_output_hides_token() {
        let session = Session::new("user-42", "super-secret");
        assert!(!format!("{session:?}").contains("super-secret"));
    }

    #[test]
    fn store_round_trips_and_clears() -> Result<()> {
        let dir = TempDir::new()?;
        let store = SessionStore::with_path(dir.path().join("nested").join("session.json"));

        assert!(store.load()?.is_none());

        store.save(&Session::new("user-1", "abc"))?;
        let loaded = store.load()?.expect("session saved");
        assert_eq!(loaded.user_id(), "user-1");
        assert_eq!(loaded.token().expose_secret(), "abc");

        store.clear()?;
        assert!(store.load()?.is_none());
        store.clear()?;
        Ok(())
    }

    #[test]
    fn corrupt_session_file_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json")?;
        assert!(SessionStore::with_path(&path).load().is_err());
        Ok(())
    }
}
