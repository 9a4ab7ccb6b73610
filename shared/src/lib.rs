//! Data model shared by the Prompt Hub client and front-end.
//!
//! `wire` mirrors the JSON the backend sends, the types in this module are the
//! display records the front-end works with, and `projection` converts one
//! into the other.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub mod projection;
pub mod query;
pub mod wire;

pub use projection::{collect_facets, normalize_optional, normalize_publish_date, platform_color};
pub use query::{ArticleQuery, PageInfo, PromptQuery, QueryEvent, QueryState};

/// The three prompt families served by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    /// 文生文
    Text,
    /// 文生图
    Image,
    /// 文生视频
    Video,
}

impl PromptCategory {
    /// All categories in menu order.
    pub const ALL: [PromptCategory; 3] =
        [PromptCategory::Text, PromptCategory::Image, PromptCategory::Video];

    /// Value used on the wire and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            PromptCategory::Text => "text",
            PromptCategory::Image => "image",
            PromptCategory::Video => "video",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            PromptCategory::Text => "文生文提示词",
            PromptCategory::Image => "文生图提示词",
            PromptCategory::Video => "文生视频提示词",
        }
    }

    /// One-line description shown above the catalog.
    pub fn description(self) -> &'static str {
        match self {
            PromptCategory::Text => "适合创作文章、营销文案、运营脚本等文本内容",
            PromptCategory::Image => "用于 Midjourney、Stable Diffusion 等 AI 绘图模型",
            PromptCategory::Video => "为 Runway、Pika 等 AIGC 视频生成模型优化而来",
        }
    }

    /// Platform family whose quick links belong to this category.
    pub fn chat_type(self) -> ChatType {
        match self {
            PromptCategory::Text => ChatType::TextGeneration,
            PromptCategory::Image => ChatType::ImageGeneration,
            PromptCategory::Video => ChatType::VideoGeneration,
        }
    }

    /// Heading for the quick links row.
    pub fn platforms_label(self) -> &'static str {
        match self {
            PromptCategory::Text => "AI 聊天平台：",
            PromptCategory::Image => "AI 绘图平台：",
            PromptCategory::Video => "AI 视频平台：",
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(PromptCategory::Text),
            "image" => Ok(PromptCategory::Image),
            "video" => Ok(PromptCategory::Video),
            other => Err(format!("unknown prompt category `{other}` (expected text, image or video)")),
        }
    }
}

/// Kind of generation an AI platform offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    /// Chat / text generation.
    TextGeneration,
    /// Image generation.
    ImageGeneration,
    /// Video generation.
    VideoGeneration,
    /// Any value this client does not know about yet.
    #[serde(other)]
    Unknown,
}

/// A prompt template as displayed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptItem {
    pub id: String,
    pub category: PromptCategory,
    pub title: String,
    /// Template body; this is what "copy" copies.
    pub description: String,
    pub example: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub tags: Vec<String>,
    pub source: Option<String>,
    pub professions: Vec<String>,
}

impl PromptItem {
    /// The media URL that matters for this prompt's category, if any.
    pub fn media_url(&self) -> Option<&str> {
        match self.category {
            PromptCategory::Text => None,
            PromptCategory::Image => self.image_url.as_deref(),
            PromptCategory::Video => self.video_url.as_deref(),
        }
    }

    /// Whether `tag` is attached to this prompt.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Whether `profession` is listed for this prompt.
    pub fn has_profession(&self, profession: &str) -> bool {
        self.professions
            .iter()
            .any(|candidate| candidate == profession)
    }
}

// 资讯文章
/// A news article ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String, // Markdown 文本
    pub category: String,
    pub publish_date: String, // YYYY-MM-DD
    pub views: u64,
    pub author: Option<String>,
}

/// An AI platform quick link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub name: String,
    pub url: String,
    /// Hex color picked from [`projection::PLATFORM_PALETTE`] by name.
    pub color: &'static str,
    pub chat_type: ChatType,
}

/// One page of display records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Pagination summary derived from `total` and `page_size`.
    pub fn info(&self) -> PageInfo {
        PageInfo::new(self.page, self.page_size, self.total)
    }
}

/// Sorted union of the tags and professions of a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub tags: Vec<String>,
    pub professions: Vec<String>,
}

/// Severity of a transient user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Action completed.
    Success,
    /// Action or request failed.
    Error,
}

/// A transient message for the user (toast / status line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// True for [`NoticeLevel::Error`].
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
