//! File-backed session store.
//!
//! The file is a small JSON document with the two keys `token` and `user`,
//! mirroring browser local storage. Writes replace the whole file through a
//! temporary sibling so a crash never leaves half a session behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{SessionError, SessionStore, StoredSession, UserIdentity};

pub struct FileSessionStore {
    path: PathBuf,
    /// Serializes writers within this process.
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, stored: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json =
            serde_json::to_vec_pretty(stored).map_err(|e| SessionError::Encode(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<StoredSession, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredSession::default()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| SessionError::Corrupt(e.to_string()))
    }

    fn set(&self, token: &str, user: &UserIdentity) -> Result<(), SessionError> {
        let stored =
            StoredSession::new(token, user).map_err(|e| SessionError::Encode(e.to_string()))?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write(&stored)?;
        debug!("Session stored at {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Session cleared at {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
