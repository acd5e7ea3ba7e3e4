use serde::{Deserialize, Deserializer, Serialize};

/// Login form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// One manga record as exposed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaEntry {
    pub id: i64,
    pub title: String,
    /// Alternate (former) title.
    pub old_name: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    /// `"1"` when the series is complete.
    pub is_finish: Option<String>,
    pub tendency: Option<String>,
    pub country: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub view_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub chapter_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl MangaEntry {
    pub fn is_finished(&self) -> bool {
        self.is_finish.as_deref() == Some("1")
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Page envelope returned by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageEnvelope {
    pub content: Vec<MangaEntry>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u32,
    pub number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_from_backend_json() {
        let entry: MangaEntry = serde_json::from_value(json!({
            "id": 12,
            "title": "海贼王",
            "oldName": "One Piece",
            "isFinish": "1",
            "viewCount": 1000,
            "favoriteCount": 50,
            "chapterCount": 1100,
            "tags": ["冒险", "热血"],
            "createdAt": "2024-03-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(entry.id, 12);
        assert_eq!(entry.old_name.as_deref(), Some("One Piece"));
        assert!(entry.is_finished());
        assert_eq!(entry.tags.len(), 2);
        assert_eq!(entry.author, None);
    }

    #[test]
    fn test_entry_tolerates_nulls() {
        let entry: MangaEntry = serde_json::from_value(json!({
            "id": 3,
            "title": "X",
            "tags": null,
            "author": null,
            "viewCount": null
        }))
        .unwrap();
        assert_eq!(entry.id, 3);
        assert!(entry.tags.is_empty());
        assert_eq!(entry.view_count, 0);
    }

    #[test]
    fn test_ongoing_entry() {
        let entry = MangaEntry {
            is_finish: Some("0".to_string()),
            ..Default::default()
        };
        assert!(!entry.is_finished());
    }

    #[test]
    fn test_page_envelope_camel_case() {
        let page: PageEnvelope = serde_json::from_value(json!({
            "content": [],
            "totalElements": 5,
            "totalPages": 1,
            "size": 20,
            "number": 0
        }))
        .unwrap();
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.size, 20);
    }
}
