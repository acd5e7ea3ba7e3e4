//! Typed client for the manga backend's REST surface.
//!
//! Holds nothing but an [`AuthenticatedTransport`], so every call made
//! through it gets credential injection and 401 handling.

mod types;

pub use types::*;

use serde_json::Value;
use tracing::debug;

use crate::messages;
use crate::transport::{ApiError, ApiResponse, AuthenticatedTransport};

const LOGIN_PATH: &str = "/api/auth/login";
const MANGA_PATH: &str = "/api/manga";
const TAGS_PATH: &str = "/api/manga/tags";
const BATCH_IMPORT_PATH: &str = "/api/admin/manga/batch-import";
const ADMIN_MANGA_PATH: &str = "/api/admin/manga";

pub struct MangaApi {
    transport: AuthenticatedTransport,
}

impl MangaApi {
    pub fn new(transport: AuthenticatedTransport) -> Self {
        Self { transport }
    }

    /// POST the credentials and return the raw response body.
    ///
    /// The login envelope varies between backend versions, so shaping it is
    /// left to [`crate::auth::normalize_login_response`].
    pub async fn login(&self, request: &LoginRequest) -> Result<Value, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.transport.post(LOGIN_PATH, body).await
    }

    /// One page of the unfiltered catalog.
    pub async fn list(&self, page: u32, size: u32) -> Result<PageEnvelope, ApiError> {
        let path = list_path(page, size);
        debug!("Listing catalog page {} (size {})", page, size);
        let response: ApiResponse<PageEnvelope> = self.transport.get(&path).await?;
        response.into_data(messages::LOAD_FAILED)
    }

    /// One page of entries carrying `tag`.
    pub async fn list_by_tag(
        &self,
        tag: &str,
        page: u32,
        size: u32,
    ) -> Result<PageEnvelope, ApiError> {
        let path = list_by_tag_path(tag, page, size);
        debug!("Listing catalog page {} for tag '{}'", page, tag);
        let response: ApiResponse<PageEnvelope> = self.transport.get(&path).await?;
        response.into_data(messages::LOAD_FAILED)
    }

    /// Every tag known to the backend.
    pub async fn all_tags(&self) -> Result<Vec<String>, ApiError> {
        let response: ApiResponse<Vec<String>> = self.transport.get(TAGS_PATH).await?;
        response.into_data(messages::LOAD_FAILED)
    }

    /// Submit entries as a single import call.
    pub async fn batch_import(&self, entries: &[Value]) -> Result<(), ApiError> {
        let body = Value::Array(entries.to_vec());
        let response: ApiResponse<Value> = self.transport.post(BATCH_IMPORT_PATH, body).await?;
        response.into_ack(messages::IMPORT_FAILED)
    }

    /// Delete one entry.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("{}/{}", ADMIN_MANGA_PATH, id);
        let response: ApiResponse<Value> = self.transport.delete(&path).await?;
        response.into_ack(messages::DELETE_FAILED)
    }
}

pub fn list_path(page: u32, size: u32) -> String {
    format!("{}?page={}&size={}", MANGA_PATH, page, size)
}

pub fn list_by_tag_path(tag: &str, page: u32, size: u32) -> String {
    format!(
        "{}/tag/{}?page={}&size={}",
        MANGA_PATH,
        urlencoding::encode(tag),
        page,
        size
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::session::MemorySessionStore;
    use crate::testing::{fixtures, MockBackend, RecordingUi};
    use crate::transport::Method;

    fn api(backend: Arc<MockBackend>) -> MangaApi {
        let transport = AuthenticatedTransport::new(
            backend,
            Arc::new(MemorySessionStore::new()),
            Arc::new(RecordingUi::new()),
        );
        MangaApi::new(transport)
    }

    #[test]
    fn test_paths() {
        assert_eq!(list_path(2, 20), "/api/manga?page=2&size=20");
        assert_eq!(
            list_by_tag_path("slice of life", 0, 20),
            "/api/manga/tag/slice%20of%20life?page=0&size=20"
        );
        assert_eq!(
            list_by_tag_path("恋爱", 1, 10),
            "/api/manga/tag/%E6%81%8B%E7%88%B1?page=1&size=10"
        );
    }

    #[tokio::test]
    async fn test_list_decodes_page() {
        let backend = Arc::new(MockBackend::new());
        backend
            .respond(
                Method::Get,
                "/api/manga?page=0&size=20",
                200,
                fixtures::page_response(
                    vec![fixtures::manga_entry(1, "A"), fixtures::manga_entry(2, "B")],
                    42,
                    0,
                    20,
                ),
            )
            .await;

        let page = api(backend).list(0, 20).await.unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 42);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content[1].title, "B");
    }

    #[tokio::test]
    async fn test_list_business_rejection() {
        let backend = Arc::new(MockBackend::new());
        backend
            .respond(
                Method::Get,
                "/api/manga?page=0&size=20",
                200,
                fixtures::rejected("维护中"),
            )
            .await;

        let result = api(backend).list(0, 20).await;
        assert_eq!(result.unwrap_err(), ApiError::Rejected("维护中".to_string()));
    }

    #[tokio::test]
    async fn test_all_tags() {
        let backend = Arc::new(MockBackend::new());
        backend
            .respond(
                Method::Get,
                "/api/manga/tags",
                200,
                fixtures::ok(json!(["romance", "action"])),
            )
            .await;

        let tags = api(backend).all_tags().await.unwrap();
        assert_eq!(tags, vec!["romance".to_string(), "action".to_string()]);
    }

    #[tokio::test]
    async fn test_batch_import_posts_array() {
        let backend = Arc::new(MockBackend::new());
        backend
            .respond(
                Method::Post,
                "/api/admin/manga/batch-import",
                200,
                fixtures::ok(json!(null)),
            )
            .await;

        api(backend.clone())
            .batch_import(&[json!({"title": "X"})])
            .await
            .unwrap();

        let requests = backend.requests().await;
        assert_eq!(requests[0].body, Some(json!([{"title": "X"}])));
    }

    #[tokio::test]
    async fn test_delete_rejected() {
        let backend = Arc::new(MockBackend::new());
        backend
            .respond(
                Method::Delete,
                "/api/admin/manga/9",
                200,
                fixtures::rejected("漫画不存在"),
            )
            .await;

        let result = api(backend).delete(9).await;
        assert_eq!(result.unwrap_err(), ApiError::Rejected("漫画不存在".to_string()));
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let backend = Arc::new(MockBackend::new());
        backend
            .respond(
                Method::Post,
                "/api/auth/login",
                200,
                fixtures::login_response("t", 1, "admin", "ADMIN"),
            )
            .await;

        let body = api(backend.clone())
            .login(&LoginRequest {
                username: "admin".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(body["data"]["token"], "t");
        let requests = backend.requests().await;
        assert_eq!(
            requests[0].body,
            Some(json!({"username": "admin", "password": "secret"}))
        );
    }
}
