use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::dashboard;
use crate::session::SessionStore;

/// The session store for `config`, honoring `session_file` overrides.
pub fn session_store(config: &Config, config_path: &Path) -> Result<SessionStore> {
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    match config.resolve_session_file(config_dir) {
        Some(path) => Ok(SessionStore::with_path(path)),
        None => SessionStore::new(),
    }
}

pub async fn login(
    config: &Config,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> Result<serde_json::Value> {
    let session = dashboard::login(config, username, password).await?;
    store.save(&session)?;
    Ok(serde_json::json!({
        "user_id": session.user_id(),
        "session_file": store.path().display().to_string()
    }))
}

pub fn logout(store: &SessionStore) -> Result<serde_json::Value> {
    let had_session = store.load()?.is_some();
    store.clear()?;
    Ok(serde_json::json!({ "logged_out": had_session }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use tempfile::TempDir;

    #[test]
    fn relative_session_file_resolves_next_to_config() -> Result<()> {
        let dir = TempDir::new()?;
        let config = Config {
            session_file: Some("state/session.json".into()),
            ..Config::default()
        };

        let store = session_store(&config, &dir.path().join("folioview.toml"))?;
        assert_eq!(store.path(), dir.path().join("state/session.json"));
        Ok(())
    }

    #[test]
    fn logout_reports_whether_a_session_existed() -> Result<()> {
        let dir = TempDir::new()?;
        let store = SessionStore::with_path(dir.path().join("session.json"));

        assert_eq!(logout(&store)?["logged_out"], false);

        store.save(&Session::new("u-1", "tok"))?;
        assert_eq!(logout(&store)?["logged_out"], true);
        assert!(store.load()?.is_none());
        Ok(())
    }
}
