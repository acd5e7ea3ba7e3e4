use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ApiError;

/// Standard backend envelope: `{success, message, data}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    /// The payload of a successful envelope.
    ///
    /// `success: false` becomes [`ApiError::Rejected`] carrying the
    /// envelope's message, or `fallback` when it has none.
    pub fn into_data(self, fallback: &str) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Parse("Successful response without data".to_string()))
    }
}

impl ApiResponse<Value> {
    /// Success check for calls whose payload is irrelevant.
    pub fn into_ack(self, fallback: &str) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

/// Accepts `true`/`false`, `"true"`/`"false"` and `null`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}
