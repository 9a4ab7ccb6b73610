//! Conversion from wire records to display records.
//!
//! Everything here is pure: no I/O, no logging, no clock.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use xxhash_rust::xxh3::xxh3_64;

use crate::{
    wire::{ArticleResponse, PageResponse, PlatformResponse, PromptResponse},
    ArticleItem, Facets, Page, Platform, PromptItem,
};

/// Colors used for platform quick links.
pub const PLATFORM_PALETTE: [&str; 8] = [
    "#10a37f", "#1e1e1e", "#ff6b35", "#1890ff", "#eb2f96", "#722ed1", "#fa8c16", "#52c41a",
];

/// Treat `None`, `""` and whitespace-only strings alike: all become `None`.
///
/// A value with content is returned untrimmed.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Reformat an ISO 8601 timestamp as `YYYY-MM-DD`.
///
/// The calendar date is the one written in the timestamp (its own offset).
/// Anything unparseable falls back to the text before the first `T`.
pub fn normalize_publish_date(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }

    match trimmed.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => trimmed.to_string(),
    }
}

/// Pick a palette color for a platform name.
///
/// xxh3 is seedless and stable across releases, so a name keeps its color
/// between runs without any persisted state.
pub fn platform_color(name: &str) -> &'static str {
    let index = xxh3_64(name.as_bytes()) % PLATFORM_PALETTE.len() as u64;
    PLATFORM_PALETTE[index as usize]
}

impl From<PromptResponse> for PromptItem {
    fn from(raw: PromptResponse) -> Self {
        PromptItem {
            id: raw.id.to_string(),
            category: raw.category,
            title: raw.title,
            description: raw.description,
            example: normalize_optional(raw.example),
            image_url: normalize_optional(raw.image_url),
            video_url: normalize_optional(raw.video_url),
            tags: raw.tags.into_iter().map(|tag| tag.tag).collect(),
            source: normalize_optional(raw.source),
            professions: raw
                .professions
                .into_iter()
                .map(|profession| profession.job)
                .collect(),
        }
    }
}

impl From<ArticleResponse> for ArticleItem {
    fn from(raw: ArticleResponse) -> Self {
        ArticleItem {
            id: raw.id.to_string(),
            title: raw.title,
            description: raw.description,
            content: raw.content,
            category: raw.category,
            publish_date: normalize_publish_date(&raw.publish_date),
            views: raw.views.max(0) as u64,
            author: normalize_optional(raw.author),
        }
    }
}

impl From<PlatformResponse> for Platform {
    fn from(raw: PlatformResponse) -> Self {
        Platform {
            color: platform_color(&raw.title),
            name: raw.title,
            url: raw.link,
            chat_type: raw.ai_chat_type,
        }
    }
}

impl<W, T: From<W>> From<PageResponse<W>> for Page<T> {
    fn from(raw: PageResponse<W>) -> Self {
        Page {
            items: raw.items.into_iter().map(T::from).collect(),
            page: raw.page,
            page_size: raw.page_size,
            total: raw.total,
        }
    }
}

/// Keep active platforms only, ordered by `SortOrder` ascending.
///
/// The sort is stable: platforms sharing a `SortOrder` keep server order.
pub fn active_platforms(raw: Vec<PlatformResponse>) -> Vec<Platform> {
    let mut active: Vec<PlatformResponse> = raw
        .into_iter()
        .filter(|platform| platform.is_active)
        .collect();
    active.sort_by_key(|platform| platform.sort_order);
    active.into_iter().map(Platform::from).collect()
}

/// Sorted union of every tag and profession in `items`.
pub fn collect_facets(items: &[PromptItem]) -> Facets {
    let mut tags = BTreeSet::new();
    let mut professions = BTreeSet::new();
    for item in items {
        tags.extend(item.tags.iter().cloned());
        professions.extend(item.professions.iter().cloned());
    }

    Facets {
        tags: tags.into_iter().collect(),
        professions: professions.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        wire::{PromptProfessionResponse, PromptTagResponse},
        ChatType, PromptCategory,
    };

    fn prompt_response(id: u64, tags: &[&str], jobs: &[&str]) -> PromptResponse {
        PromptResponse {
            id,
            category: PromptCategory::Image,
            title: format!("prompt {id}"),
            description: "template".to_string(),
            example: Some(String::new()),
            image_url: Some("https://cdn.example.com/p.png".to_string()),
            video_url: Some("   ".to_string()),
            source: None,
            copy_count: 0,
            tags: tags
                .iter()
                .map(|tag| PromptTagResponse {
                    id: 0,
                    prompt_id: id,
                    tag: tag.to_string(),
                })
                .collect(),
            professions: jobs
                .iter()
                .map(|job| PromptProfessionResponse {
                    id: 0,
                    prompt_id: id,
                    job: job.to_string(),
                })
                .collect(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn platform(title: &str, sort_order: i64, is_active: bool) -> PlatformResponse {
        PlatformResponse {
            id: sort_order as u64,
            title: title.to_string(),
            ai_chat_type: ChatType::TextGeneration,
            link: format!("https://{}.example.com", title.to_lowercase()),
            sort_order,
            is_active,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn empty_example_becomes_absent() {
        let item = PromptItem::from(prompt_response(42, &["poster"], &[]));
        assert_eq!(item.id, "42");
        assert_eq!(item.example, None);
        assert_eq!(item.video_url, None);
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example.com/p.png"));
        assert_eq!(item.tags, vec!["poster".to_string()]);
    }

    #[test]
    fn normalize_optional_keeps_content_untrimmed() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some(" \t".to_string())), None);
        assert_eq!(normalize_optional(Some(" hi ".to_string())), Some(" hi ".to_string()));
    }

    #[test]
    fn publish_date_reformats_iso_timestamps() {
        assert_eq!(normalize_publish_date("2024-03-05T10:20:30Z"), "2024-03-05");
        assert_eq!(normalize_publish_date("2024-03-05T23:59:00+08:00"), "2024-03-05");
        assert_eq!(normalize_publish_date("2024-03-05T10:20:30.123"), "2024-03-05");
        assert_eq!(normalize_publish_date("2024-03-05"), "2024-03-05");
    }

    #[test]
    fn publish_date_falls_back_to_text_before_t() {
        assert_eq!(normalize_publish_date("2024-13-45Tgarbage"), "2024-13-45");
        assert_eq!(normalize_publish_date("yesterday"), "yesterday");
    }

    #[test]
    fn negative_views_clamp_to_zero() {
        let article = ArticleItem::from(ArticleResponse {
            id: 3,
            title: "t".to_string(),
            description: String::new(),
            content: String::new(),
            category: "news".to_string(),
            publish_date: "2024-01-02T00:00:00Z".to_string(),
            views: -4,
            author: Some(String::new()),
            created_at: String::new(),
            updated_at: String::new(),
        });
        assert_eq!(article.id, "3");
        assert_eq!(article.views, 0);
        assert_eq!(article.author, None);
        assert_eq!(article.publish_date, "2024-01-02");
    }

    #[test]
    fn platform_color_is_stable_and_from_palette() {
        let first = platform_color("ChatGPT");
        assert_eq!(first, platform_color("ChatGPT"));
        assert!(PLATFORM_PALETTE.contains(&first));
        assert!(PLATFORM_PALETTE.contains(&platform_color("")));
        assert!(PLATFORM_PALETTE.contains(&platform_color("通义千问")));
    }

    #[test]
    fn active_platforms_filters_and_sorts() {
        let raw = vec![
            platform("Kimi", 30, true),
            platform("Gemini", 10, false),
            platform("Claude", 5, true),
            platform("DeepSeek", 20, true),
            platform("Doubao", 1, false),
        ];

        let names: Vec<String> = active_platforms(raw)
            .into_iter()
            .map(|platform| platform.name)
            .collect();
        assert_eq!(names, vec!["Claude", "DeepSeek", "Kimi"]);
    }

    #[test]
    fn facets_are_sorted_unions() {
        let items: Vec<PromptItem> = vec![
            prompt_response(1, &["portrait", "anime"], &["designer"]),
            prompt_response(2, &["anime", "city"], &["marketer", "designer"]),
        ]
        .into_iter()
        .map(PromptItem::from)
        .collect();

        let facets = collect_facets(&items);
        assert_eq!(facets.tags, vec!["anime", "city", "portrait"]);
        assert_eq!(facets.professions, vec!["designer", "marketer"]);
    }
}
