use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;

const TOKEN_FILE: &str = "token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("could not resolve the config directory: {0}")]
    ConfigDir(String),
    #[error("token store I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Durable storage for the session bearer token.
///
/// One file under the app config dir holding the raw token string. The
/// in-memory copy lives on `ApiClient` and every change goes through it,
/// so the two copies stay equal.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store under the app config dir (`~/.config/summary-admin-tui/token`).
    pub fn open_default() -> Result<Self, TokenStoreError> {
        let dir = Config::app_dir().map_err(|e| TokenStoreError::ConfigDir(e.to_string()))?;
        Ok(Self {
            path: dir.join(TOKEN_FILE),
        })
    }

    /// Store rooted at an explicit directory.
    pub fn at_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(TOKEN_FILE),
        }
    }

    /// Read the persisted token. `None` when no token was ever saved or
    /// the saved value is empty.
    pub fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenStoreError::from(e)),
        }
    }

    /// Overwrite the persisted token.
    pub fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Delete the persisted token. Idempotent: clearing an empty store is
    /// not an error.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_dir(dir.path());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_dir(dir.path());
        store.save("eyJhbGciOiJIUzI1NiJ9").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("eyJhbGciOiJIUzI1NiJ9"));
    }

    #[test]
    fn test_save_overwrites_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_dir(dir.path());
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear_removes_token_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_dir(dir.path());
        store.save("short-lived").unwrap();

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // clearing again must not fail
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_token_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at_dir(dir.path());
        store.save("  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
