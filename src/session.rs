//! Session store - the auth token in memory and on disk
//!
//! The controller is the only writer. Anything else that needs the token
//! (the network actor) holds a [`watch::Receiver`] from [`SessionStore::subscribe`].

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// Values an older client may have written instead of removing the file
const LEGACY_EMPTY: [&str; 2] = ["null", "undefined"];

pub struct SessionStore {
    token: Option<String>,
    path: Option<PathBuf>,
    notify: watch::Sender<Option<String>>,
}

impl SessionStore {
    /// Open a file-backed store and read back any saved token
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = read_token(&path);
        tracing::debug!(path = %path.display(), restored = token.is_some(), "session opened");
        let (notify, _) = watch::channel(token.clone());
        SessionStore {
            token,
            path: Some(path),
            notify,
        }
    }

    /// A store that never touches the filesystem
    pub fn in_memory() -> Self {
        let (notify, _) = watch::channel(None);
        SessionStore {
            token: None,
            path: None,
            notify,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Receive every token change from now on
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.notify.subscribe()
    }

    /// Replace the token. Empty values clear the session.
    ///
    /// A failed write is logged; the in-memory token still changes.
    pub fn set(&mut self, token: Option<String>) {
        let token = normalize(token);
        if let Err(e) = self.persist(token.as_deref()) {
            tracing::warn!(error = %e, "failed to persist session");
        }
        if self.token != token {
            tracing::debug!(signed_in = token.is_some(), "session changed");
            self.token = token;
            self.notify.send_replace(self.token.clone());
        }
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    fn persist(&self, token: Option<&str>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match token {
            Some(token) => {
                if let Some(dir) = path.parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        fs::create_dir_all(dir)?;
                    }
                }
                fs::write(path, token)?;
            }
            None => {
                if path.exists() {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}

fn read_token(path: &Path) -> Option<String> {
    normalize(fs::read_to_string(path).ok())
}

fn normalize(token: Option<String>) -> Option<String> {
    let token = token?;
    let trimmed = token.trim();
    if trimmed.is_empty() || LEGACY_EMPTY.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session");

        let mut store = SessionStore::open(&path);
        assert_eq!(store.token(), None);
        store.set(Some("T1".to_string()));
        assert_eq!(store.token(), Some("T1"));

        let reloaded = SessionStore::open(&path);
        assert_eq!(reloaded.token(), Some("T1"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session");

        let mut store = SessionStore::open(&path);
        store.set(Some("abc".to_string()));
        assert!(path.exists());

        store.clear();
        assert!(!store.is_authenticated());
        assert!(!path.exists());
        assert_eq!(SessionStore::open(&path).token(), None);
    }

    #[test]
    fn test_empty_token_clears() {
        let mut store = SessionStore::in_memory();
        store.set(Some("abc".to_string()));
        store.set(Some("   ".to_string()));
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_legacy_literals_read_as_absent() {
        let dir = tempdir().unwrap();
        for literal in ["null", "undefined", "", "\n"] {
            let path = dir.path().join("session");
            fs::write(&path, literal).unwrap();
            assert_eq!(SessionStore::open(&path).token(), None, "literal {:?}", literal);
        }
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut store = SessionStore::in_memory();
        let mut rx = store.subscribe();
        assert_eq!(*rx.borrow(), None);

        store.set(Some("T2".to_string()));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_deref(), Some("T2"));

        store.set(Some("T2".to_string()));
        assert!(!rx.has_changed().unwrap());

        store.clear();
        assert_eq!(*rx.borrow_and_update(), None);
    }
}
