use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{SessionError, SessionStore, StoredSession, UserIdentity};

/// In-process session store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<StoredSession>,
    clears: AtomicUsize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw key values.
    pub fn with_raw(token: Option<&str>, user: Option<&str>) -> Self {
        Self {
            inner: Mutex::new(StoredSession {
                token: token.map(str::to_string),
                user: user.map(str::to_string),
            }),
            clears: AtomicUsize::new(0),
        }
    }

    /// Number of times `clear` has been called.
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<StoredSession, SessionError> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, token: &str, user: &UserIdentity) -> Result<(), SessionError> {
        let stored =
            StoredSession::new(token, user).map_err(|e| SessionError::Encode(e.to_string()))?;
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = stored;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = StoredSession::default();
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
