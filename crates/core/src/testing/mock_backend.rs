//! Scripted backend for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::transport::{ApiError, HttpExchange, HttpRequest, HttpResponse, Method};

/// Mock implementation of the HttpExchange trait.
///
/// Routes are matched on method plus exact path (including query string).
/// Unscripted routes answer 404. Every request is recorded, headers
/// included, so tests can assert on what went over the wire.
#[derive(Debug, Default)]
pub struct MockBackend {
    routes: Arc<RwLock<HashMap<(Method, String), HttpResponse>>>,
    /// Network failures keyed by path, regardless of method.
    failing_paths: Arc<RwLock<Vec<String>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    requests: Arc<RwLock<Vec<HttpRequest>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON body.
    pub async fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string())
            .await;
    }

    /// Answer `method path` with `status` and a raw body.
    pub async fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.routes
            .write()
            .await
            .insert((method, path.to_string()), HttpResponse::new(status, body));
    }

    /// Make every request to `path` fail before a response arrives.
    pub async fn fail_network(&self, path: &str) {
        self.failing_paths.write().await.push(path.to_string());
    }

    /// Hold responses for `path` back by `delay`.
    pub async fn set_delay(&self, path: &str, delay: Duration) {
        self.delays.write().await.insert(path.to_string(), delay);
    }

    /// All recorded requests, oldest first.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().await.clone()
    }

    /// Paths of recorded requests, oldest first.
    pub async fn request_paths(&self) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .map(|r| r.path.clone())
            .collect()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Number of recorded requests for `method path`.
    pub async fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl HttpExchange for MockBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let key = (request.method, request.path.clone());
        self.requests.write().await.push(request);

        let delay = self.delays.read().await.get(&key.1).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_paths.read().await.contains(&key.1) {
            return Err(ApiError::Network("connection refused".to_string()));
        }

        let scripted = self.routes.read().await.get(&key).cloned();
        Ok(scripted.unwrap_or_else(|| {
            HttpResponse::new(404, r#"{"success":false,"message":"not found"}"#)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_response_and_recording() {
        let backend = MockBackend::new();
        backend
            .respond(Method::Get, "/a", 200, json!({"success": true}))
            .await;

        let response = backend
            .send(HttpRequest::new(Method::Get, "/a"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(backend.request_count().await, 1);
        assert_eq!(backend.count(Method::Get, "/a").await, 1);
        assert_eq!(backend.count(Method::Post, "/a").await, 0);
    }

    #[tokio::test]
    async fn test_unscripted_is_404() {
        let backend = MockBackend::new();
        let response = backend
            .send(HttpRequest::new(Method::Delete, "/nope"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let backend = MockBackend::new();
        backend.fail_network("/down").await;
        let result = backend.send(HttpRequest::new(Method::Get, "/down")).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(backend.request_paths().await, vec!["/down".to_string()]);
    }
}
