use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{LoginRequest, MangaApi};
use crate::messages;
use crate::session::{SessionStore, UserIdentity};
use crate::transport::ApiError;
use crate::ui::{ConsoleUi, Notice, Route};

use super::{normalize_login_response, AuthError};

/// Login and logout: the only paths besides 401 handling and the gate that
/// write the session store.
pub struct LoginFlow {
    api: Arc<MangaApi>,
    session: Arc<dyn SessionStore>,
    ui: Arc<dyn ConsoleUi>,
}

impl LoginFlow {
    pub fn new(api: Arc<MangaApi>, session: Arc<dyn SessionStore>, ui: Arc<dyn ConsoleUi>) -> Self {
        Self { api, session, ui }
    }

    /// Authenticate an administrator and store the session.
    ///
    /// Non-admin accounts are refused and nothing is stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let result = self.try_login(username, password).await;
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;
        let grant = normalize_login_response(&response)?;

        if !grant.user.is_admin() {
            warn!(
                "Refusing login for '{}' with role '{}'",
                grant.user.username, grant.user.role
            );
            return Err(AuthError::NotAdmin(grant.user.role));
        }

        self.session.set(&grant.token, &grant.user)?;
        info!("Logged in as '{}'", grant.user.username);

        self.ui.notify(Notice::success(messages::LOGIN_SUCCEEDED));
        self.ui.navigate(Route::Catalog);
        Ok(grant.user)
    }

    /// Drop the session and return to the login view.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        info!("Logged out");
        self.ui.navigate(Route::Login);
        Ok(())
    }

    fn report(&self, error: &AuthError) {
        let notice = match error {
            AuthError::MissingUsername => Notice::warning(messages::USERNAME_REQUIRED),
            AuthError::MissingPassword => Notice::warning(messages::PASSWORD_REQUIRED),
            AuthError::NotAdmin(_) => Notice::error(messages::ADMIN_ONLY),
            AuthError::Rejected(message) => Notice::error(message.clone()),
            // The transport already told the operator
            AuthError::Api(ApiError::Unauthorized(_)) => return,
            AuthError::Api(ApiError::Http { message, .. }) => Notice::error(message.clone()),
            AuthError::Api(_) => Notice::error(messages::LOGIN_FAILED_CHECK_CREDENTIALS),
            AuthError::Storage(e) => Notice::error(messages::with_detail(
                messages::LOGIN_FAILED,
                &e.to_string(),
            )),
        };
        self.ui.notify(notice);
    }
}
