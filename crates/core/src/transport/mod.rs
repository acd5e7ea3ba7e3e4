//! Authenticated transport.
//!
//! Every backend call goes through [`AuthenticatedTransport`], which attaches
//! the stored credential on the way out and normalizes responses on the way
//! back. The wire itself sits behind the [`HttpExchange`] trait so the
//! console can run against a real backend or a scripted one.

mod authenticated;
mod envelope;
mod exchange;
mod reqwest_exchange;

pub use authenticated::AuthenticatedTransport;
pub use envelope::ApiResponse;
pub use exchange::*;
pub use reqwest_exchange::ReqwestExchange;

use thiserror::Error;

/// Errors surfaced by backend calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Request failed before a response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered 401. The session has already been purged.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Well-formed response with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Text suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Rejected(message) | ApiError::Unauthorized(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let http = ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(http.user_message(), "boom");
        assert_eq!(ApiError::Rejected("nope".to_string()).user_message(), "nope");
        assert_eq!(ApiError::Timeout.user_message(), "Request timed out");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::Unauthorized("x".to_string()).is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
    }
}
