//! Testing utilities: a scripted backend, a recording UI and fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use manga_admin_core::testing::{fixtures, MockBackend, RecordingUi};
//!
//! let backend = MockBackend::new();
//! backend
//!     .respond(Method::Get, "/api/manga?page=0&size=20", 200,
//!         fixtures::page_response(vec![fixtures::manga_entry(1, "Berserk")], 1, 0, 20))
//!     .await;
//!
//! // Hand `backend` to AdminConsole::new(...) and assert on backend.requests()
//! ```

mod mock_backend;
mod recording_ui;

pub use mock_backend::MockBackend;
pub use recording_ui::RecordingUi;

/// Test fixtures and helper functions.
pub mod fixtures {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::api::MangaEntry;

    /// Build an unsigned JWT-shaped token carrying `claims`.
    pub fn token_with_claims(claims: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{}.{}.c2lnbmF0dXJl", header, payload)
    }

    /// Token for subject `admin` expiring at `exp` (epoch seconds).
    pub fn token_with_exp(exp: i64) -> String {
        token_with_claims(json!({"sub": "admin", "exp": exp}))
    }

    /// Token expiring one hour from now.
    pub fn valid_token() -> String {
        token_with_exp(Utc::now().timestamp() + 3600)
    }

    /// Token for `subject` expiring one hour from now.
    pub fn valid_token_for(subject: &str) -> String {
        token_with_claims(json!({"sub": subject, "exp": Utc::now().timestamp() + 3600}))
    }

    /// Token that expired an hour ago.
    pub fn expired_token() -> String {
        token_with_exp(Utc::now().timestamp() - 3600)
    }

    /// Token that expires in 30 seconds, inside the safety margin.
    pub fn nearly_expired_token() -> String {
        token_with_exp(Utc::now().timestamp() + 30)
    }

    /// A catalog entry with reasonable defaults.
    pub fn manga_entry(id: i64, title: &str) -> MangaEntry {
        MangaEntry {
            id,
            title: title.to_string(),
            old_name: Some(format!("{} (old)", title)),
            description: Some(format!("A story called {}.", title)),
            cover_image_url: Some(format!("https://cdn.example.com/covers/{}.jpg", id)),
            author: Some("Test Author".to_string()),
            is_finish: Some("0".to_string()),
            tendency: None,
            country: Some("1".to_string()),
            view_count: 100 * id,
            favorite_count: 10 * id,
            chapter_count: 12,
            tags: vec!["action".to_string()],
            created_at: Some("2024-01-01T00:00:00".to_string()),
            updated_at: None,
        }
    }

    /// `{success, data}` wrapper.
    pub fn ok(data: Value) -> Value {
        json!({"success": true, "message": "ok", "data": data})
    }

    /// `{success: false, message}` wrapper.
    pub fn rejected(message: &str) -> Value {
        json!({"success": false, "message": message, "data": null})
    }

    /// A list response envelope for `entries`.
    pub fn page_response(entries: Vec<MangaEntry>, total: u64, page: u32, size: u32) -> Value {
        let total_pages = if size == 0 {
            0
        } else {
            total.div_ceil(size as u64)
        };
        ok(json!({
            "content": entries,
            "totalElements": total,
            "totalPages": total_pages,
            "size": size,
            "number": page,
        }))
    }

    /// A login response in the nested `data.token` / `data.user` shape.
    pub fn login_response(token: &str, id: i64, username: &str, role: &str) -> Value {
        json!({
            "success": true,
            "message": "登录成功",
            "data": {
                "token": token,
                "user": {"id": id, "username": username, "role": role},
            }
        })
    }
}
