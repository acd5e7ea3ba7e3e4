//! Login response normalization.
//!
//! Backends in the field answer login in two shapes:
//!
//! - nested: `{success, message, data: {token, user: {id, username, role}}}`
//! - flattened: `{success, message, token, data: {id, username, role}}`
//!
//! Lookup order, first hit wins:
//!
//! 1. token: `data.token`, then top-level `token`
//! 2. user: `data.user`, then `data` itself
//!
//! The response counts as accepted when `success` is `true` (or the string
//! `"true"`), or when it is falsy but a token is present anyway. Anything
//! that still lacks a token or a decodable user is a rejection.

use serde_json::Value;

use crate::messages;
use crate::session::UserIdentity;

use super::AuthError;

/// Credential and identity extracted from a login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub user: UserIdentity,
}

pub fn normalize_login_response(response: &Value) -> Result<LoginGrant, AuthError> {
    let data = response.get("data").filter(|d| !d.is_null());

    let token = data
        .and_then(|d| d.get("token"))
        .and_then(Value::as_str)
        .or_else(|| response.get("token").and_then(Value::as_str))
        .filter(|t| !t.is_empty());

    let success = match response.get("success") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    };

    if !success && token.is_none() {
        return Err(AuthError::Rejected(rejection_message(response)));
    }

    let token = token.ok_or_else(|| AuthError::Rejected(rejection_message(response)))?;

    let user_value = data
        .and_then(|d| d.get("user"))
        .filter(|u| u.is_object())
        .or(data);
    let user = user_value
        .and_then(|u| serde_json::from_value::<UserIdentity>(u.clone()).ok())
        .ok_or_else(|| AuthError::Rejected(rejection_message(response)))?;

    Ok(LoginGrant {
        token: token.to_string(),
        user,
    })
}

fn rejection_message(response: &Value) -> String {
    response
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(messages::LOGIN_FAILED)
        .to_string()
}
