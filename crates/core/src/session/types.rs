use serde::{Deserialize, Serialize};
use tracing::warn;

/// Role required to use the console.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Identity of the operator a credential was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Raw contents of the two storage keys.
///
/// `user` holds the JSON-serialized [`UserIdentity`] exactly as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl StoredSession {
    pub fn new(token: &str, user: &UserIdentity) -> Result<Self, serde_json::Error> {
        Ok(Self {
            token: Some(token.to_string()),
            user: Some(serde_json::to_string(user)?),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }

    /// Parse the stored identity. An unparseable value is logged and ignored.
    pub fn user(&self) -> Option<UserIdentity> {
        let raw = self.user.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring unparseable stored user identity: {}", e);
                None
            }
        }
    }
}

/// A live session: a credential that passed the gate, plus its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Option<UserIdentity>,
}
