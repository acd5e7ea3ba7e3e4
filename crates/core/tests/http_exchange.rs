//! Wire-level tests of the reqwest exchange against an in-process stub
//! backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use manga_admin_core::{
    testing::{fixtures, RecordingUi},
    AdminConsole, ApiConfig, ApiError, Config, HttpExchange, HttpRequest, MemorySessionStore,
    Method, ReqwestExchange, Route, SessionStore,
};

type Reply = (StatusCode, Json<Value>);

#[derive(Clone)]
struct StubState {
    token: Arc<String>,
}

impl StubState {
    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.token);
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected)
    }
}

fn unauthorized() -> Reply {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "未授权"})))
}

async fn login(State(state): State<StubState>, Json(body): Json<Value>) -> Reply {
    let role = if body["username"] == "admin" { "ADMIN" } else { "USER" };
    (
        StatusCode::OK,
        Json(fixtures::login_response(&state.token, 1, "admin", role)),
    )
}

async fn tags(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(fixtures::ok(json!(["恋爱", "action"]))))
}

async fn list(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, u32>>,
) -> Reply {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let page = params.get("page").copied().unwrap_or(0);
    let size = params.get("size").copied().unwrap_or(0);
    let entries = vec![fixtures::manga_entry(page as i64 + 1, "Berserk")];
    (
        StatusCode::OK,
        Json(fixtures::page_response(entries, 50, page, size)),
    )
}

async fn list_by_tag(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(tag): Path<String>,
) -> Reply {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    // Echo the decoded tag as the title
    let entries = vec![fixtures::manga_entry(9, &tag)];
    (StatusCode::OK, Json(fixtures::page_response(entries, 1, 0, 20)))
}

async fn remove(State(state): State<StubState>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    if id == 404 {
        return (StatusCode::OK, Json(fixtures::rejected("漫画不存在")));
    }
    (StatusCode::OK, Json(fixtures::ok(Value::Null)))
}

async fn batch_import(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let count = body.as_array().map(Vec::len).unwrap_or(0);
    (StatusCode::OK, Json(fixtures::ok(json!(count))))
}

async fn slow() -> Reply {
    tokio::time::sleep(Duration::from_secs(3)).await;
    (StatusCode::OK, Json(fixtures::ok(Value::Null)))
}

async fn crash() -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>".to_string())
}

/// Start the stub on an ephemeral port and return its base URL.
async fn spawn_stub(token: &str) -> String {
    let state = StubState {
        token: Arc::new(token.to_string()),
    };
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/manga", get(list))
        .route("/api/manga/tags", get(tags))
        .route("/api/manga/tag/{tag}", get(list_by_tag))
        .route("/api/admin/manga/{id}", delete(remove))
        .route("/api/admin/manga/batch-import", post(batch_import))
        .route("/slow", get(slow))
        .route("/crash", get(crash))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub");
    let addr: SocketAddr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub server failed");
    });
    format!("http://{}", addr)
}

fn api_config(base_url: &str, timeout_secs: u64) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs,
    }
}

fn console(base_url: &str, session: Arc<MemorySessionStore>) -> (Arc<RecordingUi>, AdminConsole) {
    let ui = Arc::new(RecordingUi::new());
    let exchange = ReqwestExchange::new(&api_config(base_url, 5)).expect("Failed to build client");
    let console = AdminConsole::new(Config::default(), Arc::new(exchange), session, ui.clone());
    (ui, console)
}

#[tokio::test]
async fn test_login_then_browse_over_http() {
    let token = fixtures::valid_token();
    let base_url = spawn_stub(&token).await;
    let session = Arc::new(MemorySessionStore::new());
    let (ui, console) = console(&base_url, session.clone());

    let user = console.login("admin", "secret").await.unwrap();

    assert!(user.is_admin());
    assert_eq!(session.get().unwrap().token.as_deref(), Some(token.as_str()));
    assert_eq!(ui.navigations(), vec![Route::Catalog]);
    assert_eq!(
        console.catalog().tags().await,
        vec!["恋爱".to_string(), "action".to_string()]
    );
    assert_eq!(console.catalog().total_count().await, 50);

    console.catalog().goto_page(2).await.unwrap();
    let page = console.catalog().page().await.unwrap();
    assert_eq!(page.page_index, 2);
    assert_eq!(page.ids(), vec![3]);
}

#[tokio::test]
async fn test_tag_path_is_percent_encoded() {
    let token = fixtures::valid_token();
    let base_url = spawn_stub(&token).await;
    let session = Arc::new(MemorySessionStore::with_raw(Some(&token), None));
    let (_ui, console) = console(&base_url, session);

    console
        .catalog()
        .set_filter(Some("slice of life/恋爱".to_string()))
        .await
        .unwrap();

    let page = console.catalog().page().await.unwrap();
    assert_eq!(page.items[0].title, "slice of life/恋爱");
}

#[tokio::test]
async fn test_wrong_credential_is_rejected_and_purged() {
    let base_url = spawn_stub(&fixtures::valid_token()).await;
    let session = Arc::new(MemorySessionStore::with_raw(
        Some(&fixtures::valid_token_for("someone-else")),
        None,
    ));
    let (ui, console) = console(&base_url, session.clone());

    let result = console.catalog().load(0).await;

    assert_eq!(result.unwrap_err(), ApiError::Unauthorized("未授权".to_string()));
    assert!(session.get().unwrap().is_empty());
    assert_eq!(session.clear_count(), 1);
    assert_eq!(ui.navigations(), vec![Route::Login]);
}

#[tokio::test]
async fn test_delete_and_import_over_http() {
    let token = fixtures::valid_token();
    let base_url = spawn_stub(&token).await;
    let session = Arc::new(MemorySessionStore::with_raw(Some(&token), None));
    let (_ui, console) = console(&base_url, session);

    let outcome = console.batch().delete_many(&[3, 404, 5]).await.unwrap();
    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.failure_count, 1);

    let count = console
        .batch()
        .import_many(json!([{"title": "A"}, {"title": "B"}]))
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_non_json_error_body() {
    let base_url = spawn_stub("t").await;
    let exchange = ReqwestExchange::new(&api_config(&base_url, 5)).unwrap();

    let response = exchange
        .send(HttpRequest::new(Method::Get, "/crash"))
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body, "<html>oops</html>");
}

#[tokio::test]
async fn test_timeout() {
    let base_url = spawn_stub("t").await;
    let exchange = ReqwestExchange::new(&api_config(&base_url, 1)).unwrap();

    let result = exchange.send(HttpRequest::new(Method::Get, "/slow")).await;

    assert_eq!(result.unwrap_err(), ApiError::Timeout);
}

#[tokio::test]
async fn test_connection_refused() {
    // Grab a free port, then close it again
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let exchange = ReqwestExchange::new(&api_config(&format!("http://{}", addr), 5)).unwrap();
    let result = exchange.send(HttpRequest::new(Method::Get, "/api/manga")).await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}
