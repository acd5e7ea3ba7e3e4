//! Session store: the single source of truth for the current credential
//! and the identity of the operator it was issued to.
//!
//! Only three paths write here: login (`set`), the authorization gate
//! (`clear`) and the transport's 401 handling (`clear`).

mod file;
mod memory;
mod types;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to encode session: {0}")]
    Encode(String),
}

/// Narrow get/set/clear interface over persistent client storage.
pub trait SessionStore: Send + Sync {
    /// Read both keys. Missing keys are `None`, never an error.
    fn get(&self) -> Result<StoredSession, SessionError>;

    /// Write credential and identity together.
    fn set(&self, token: &str, user: &UserIdentity) -> Result<(), SessionError>;

    /// Remove credential and identity together.
    fn clear(&self) -> Result<(), SessionError>;

    /// The stored identity, if present and parseable.
    fn current_user(&self) -> Option<UserIdentity> {
        self.get().ok().and_then(|stored| stored.user())
    }
}
