//! Login and logout.

mod login;
mod normalize;

pub use login::*;
pub use normalize::*;

use thiserror::Error;

use crate::session::SessionError;
use crate::transport::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username is required")]
    MissingUsername,

    #[error("Password is required")]
    MissingPassword,

    /// Backend refused the login, or answered in an unusable shape.
    #[error("Login rejected: {0}")]
    Rejected(String),

    /// Credentials were fine but the account is not an administrator.
    #[error("Account role '{0}' may not use the console")]
    NotAdmin(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to store session: {0}")]
    Storage(#[from] SessionError),
}
