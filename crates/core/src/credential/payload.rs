use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded claims segment of a credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenPayload {
    claims: Map<String, Value>,
}

impl TokenPayload {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Raw `exp` claim in seconds since the epoch.
    ///
    /// Fractional values are truncated. Non-numeric values count as absent.
    pub fn expires_at(&self) -> Option<i64> {
        let exp = self.claims.get("exp")?;
        exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))
    }

    /// Expiry in milliseconds since the epoch.
    pub fn expires_at_millis(&self) -> Option<i64> {
        self.expires_at().map(|secs| secs.saturating_mul(1000))
    }

    /// The `sub` claim, if present.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}
