use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::messages;
use crate::session::SessionStore;
use crate::ui::{ConsoleUi, Notice, Route};

use super::{ApiError, HttpExchange, HttpRequest, HttpResponse, Method};

/// Wraps an [`HttpExchange`] with credential injection and uniform
/// response handling.
///
/// A 401 from any call purges the session, tells the operator, and sends
/// the UI back to the login view before the error reaches the caller.
pub struct AuthenticatedTransport {
    exchange: Arc<dyn HttpExchange>,
    session: Arc<dyn SessionStore>,
    ui: Arc<dyn ConsoleUi>,
}

impl AuthenticatedTransport {
    pub fn new(
        exchange: Arc<dyn HttpExchange>,
        session: Arc<dyn SessionStore>,
        ui: Arc<dyn ConsoleUi>,
    ) -> Self {
        Self {
            exchange,
            session,
            ui,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpRequest::new(Method::Get, path)).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(HttpRequest::new(Method::Post, path).with_body(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpRequest::new(Method::Delete, path)).await
    }

    /// Send a request through both stages and decode the response body.
    pub async fn request<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let request = self.outbound(request);
        let method = request.method;
        let path = request.path.clone();

        let response = self.exchange.send(request).await.map_err(|e| {
            warn!("{} {} failed: {}", method, path, e);
            e
        })?;
        debug!("{} {} -> {}", method, path, response.status);

        self.inbound(response)
    }

    /// Attach the stored credential as a bearer header, if there is one.
    fn outbound(&self, mut request: HttpRequest) -> HttpRequest {
        match self.session.get() {
            Ok(stored) => {
                if let Some(token) = stored.token {
                    request
                        .headers
                        .insert("authorization".to_string(), format!("Bearer {}", token));
                }
            }
            Err(e) => warn!("Could not read session, sending request without credential: {}", e),
        }
        request
    }

    fn inbound<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        if response.is_success() {
            return serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()));
        }

        let message = error_message(&response);
        if response.status == 401 {
            self.deauthenticate();
            return Err(ApiError::Unauthorized(message));
        }

        Err(ApiError::Http {
            status: response.status,
            message,
        })
    }

    fn deauthenticate(&self) {
        info!("Backend rejected credential, clearing session");
        self.ui.notify(Notice::error(messages::SESSION_EXPIRED));
        if let Err(e) = self.session.clear() {
            error!("Failed to clear session after 401: {}", e);
        }
        self.ui.navigate(Route::Login);
    }
}

/// The error body's `message` field, else `HTTP <status>`.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}
