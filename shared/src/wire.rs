//! JSON shapes returned by the Prompt Hub backend.
//!
//! Field names follow the backend (Go-style `PascalCase` for records,
//! `camelCase` for page wrappers). Optional strings stay as the server sent
//! them here; `projection` decides what counts as absent.

use serde::Deserialize;
use serde_json::Value;

use crate::{ChatType, PromptCategory};

/// Uniform response envelope: `code == 0` means success.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    /// Payload, decoded by the caller once `code` has been checked.
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    /// Whether the backend reported success.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// `data` of the paged endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResponse<T> {
    // Explicit bound and `Vec::new` default: `T` need not implement `Default`.
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total: u64,
}

/// One row of `GET /api/platforms`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlatformResponse {
    #[serde(rename = "ID")]
    pub id: u64,
    pub title: String,
    #[serde(rename = "AIChatType")]
    pub ai_chat_type: ChatType,
    pub link: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Tag relation of a prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PromptTagResponse {
    #[serde(rename = "ID", default)]
    pub id: u64,
    #[serde(rename = "PromptID", default)]
    pub prompt_id: u64,
    pub tag: String,
}

/// Profession relation of a prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PromptProfessionResponse {
    #[serde(rename = "ID", default)]
    pub id: u64,
    #[serde(rename = "PromptID", default)]
    pub prompt_id: u64,
    pub job: String,
}

/// A prompt as stored by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PromptResponse {
    #[serde(rename = "ID")]
    pub id: u64,
    pub category: PromptCategory,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(rename = "ImageURL", default)]
    pub image_url: Option<String>,
    #[serde(rename = "VideoURL", default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub copy_count: u64,
    // The backend sends `null` instead of `[]` for prompts without relations.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<PromptTagResponse>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub professions: Vec<PromptProfessionResponse>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// An article as stored by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArticleResponse {
    #[serde(rename = "ID")]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    /// ISO 8601 timestamp.
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_response_decodes_backend_shape() {
        let raw = r#"{
            "ID": 7,
            "Category": "image",
            "Title": "Cyberpunk city",
            "Description": "A neon city at night, {style}",
            "Example": "",
            "ImageURL": "https://cdn.example.com/city.png",
            "VideoURL": "",
            "Source": "community",
            "CopyCount": 12,
            "Tags": [{"ID": 1, "PromptID": 7, "Tag": "city"}],
            "Professions": null,
            "CreatedAt": "2024-05-01T08:00:00Z",
            "UpdatedAt": "2024-05-02T08:00:00Z"
        }"#;

        let prompt: PromptResponse = serde_json::from_str(raw).expect("decode prompt");
        assert_eq!(prompt.id, 7);
        assert_eq!(prompt.category, PromptCategory::Image);
        assert_eq!(prompt.example.as_deref(), Some(""));
        assert_eq!(prompt.tags.len(), 1);
        assert_eq!(prompt.tags[0].tag, "city");
        assert!(prompt.professions.is_empty());
    }

    #[test]
    fn envelope_keeps_data_undecoded() {
        let raw = r#"{"code": 1001, "message": "bad category", "data": null}"#;
        let envelope: ApiResponse = serde_json::from_str(raw).expect("decode envelope");
        assert!(!envelope.is_success());
        assert_eq!(envelope.message, "bad category");
        assert!(envelope.data.is_null());
    }

    #[test]
    fn page_response_uses_camel_case() {
        let raw = r#"{"items": [], "page": 2, "pageSize": 20, "total": 41}"#;
        let page: PageResponse<ArticleResponse> = serde_json::from_str(raw).expect("decode page");
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total, 41);
    }

    #[test]
    fn prompt_page_tolerates_missing_or_null_items() {
        let missing: PageResponse<PromptResponse> =
            serde_json::from_str(r#"{"page": 1, "pageSize": 1000, "total": 0}"#).expect("decode page");
        assert!(missing.items.is_empty());

        let null: PageResponse<PromptResponse> =
            serde_json::from_str(r#"{"items": null, "page": 1, "pageSize": 1000, "total": 0}"#)
                .expect("decode page");
        assert!(null.items.is_empty());

        let one: PageResponse<PromptResponse> = serde_json::from_str(
            r#"{"items": [{"ID": 3, "Category": "text", "Title": "t", "Description": "d"}],
                "page": 1, "pageSize": 1000, "total": 1}"#,
        )
        .expect("decode page");
        assert_eq!(one.items[0].id, 3);
    }
}
