//! Plain-text views for the terminal.

use std::fmt::Write as _;

use prompt_hub_client::{
    news::{NewsView, ARTICLE_NOT_FOUND},
    ArticleDetail, CatalogView,
};
use prompt_hub_shared::{
    ArticleItem, Notice, NoticeLevel, PageInfo, Platform, PromptCategory, PromptItem, QueryState,
};

const PREVIEW_CHARS: usize = 80;

/// Whether to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Color,
}

/// Shorten `text` to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let mut short: String = single_line.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

fn paint(text: &str, hex: &str, style: Style) -> String {
    match (style, hex_to_rgb(hex)) {
        (Style::Color, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        _ => text.to_string(),
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Quick links row for `category`.
pub fn quick_links(category: PromptCategory, platforms: &[Platform], style: Style) -> String {
    let links: Vec<String> = platforms
        .iter()
        .filter(|platform| platform.chat_type == category.chat_type())
        .map(|platform| format!("{} ↗ {}", paint(&platform.name, platform.color, style), platform.url))
        .collect();

    let mut out = String::from(category.platforms_label());
    if links.is_empty() {
        out.push_str(" -");
    }
    for link in links {
        let _ = write!(out, "\n  {link}");
    }
    out
}

/// Catalog header, filter summary, cards and facets.
pub fn catalog(state: &QueryState, view: &CatalogView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", state.category.label());
    let _ = writeln!(out, "{}", state.category.description());

    if state.has_filters() {
        let mut filters = Vec::new();
        if !state.search.trim().is_empty() {
            filters.push(format!("search: {}", state.search.trim()));
        }
        if !state.tags.is_empty() {
            filters.push(format!("tags (all): {}", join(state.tags.iter())));
        }
        if !state.professions.is_empty() {
            filters.push(format!("professions (any): {}", join(state.professions.iter())));
        }
        let _ = writeln!(out, "[{}]", filters.join(" | "));
    }

    if view.loading {
        let _ = writeln!(out, "加载中…");
    } else if view.prompts.is_empty() {
        let _ = writeln!(out, "暂无提示词");
    }
    for (index, prompt) in view.prompts.iter().enumerate() {
        out.push_str(&prompt_card(index + 1, prompt));
    }

    if !view.facets.tags.is_empty() {
        let _ = writeln!(out, "标签: {}", join(view.facets.tags.iter()));
    }
    if !view.facets.professions.is_empty() {
        let _ = writeln!(out, "职业: {}", join(view.facets.professions.iter()));
    }
    out
}

fn join<'a>(values: impl Iterator<Item = &'a String>) -> String {
    values.map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// One catalog card.
pub fn prompt_card(index: usize, prompt: &PromptItem) -> String {
    let mut out = format!("{index:>3}. {} (#{})\n", prompt.title, prompt.id);
    let _ = writeln!(out, "     {}", truncate(&prompt.description, PREVIEW_CHARS));
    if !prompt.tags.is_empty() {
        let _ = writeln!(out, "     #{}", prompt.tags.join(" #"));
    }
    out
}

/// Full prompt, as in the detail drawer.
pub fn prompt_detail(prompt: &PromptItem) -> String {
    let mut out = format!("{} (#{})\n", prompt.title, prompt.id);
    let _ = writeln!(out, "分类: {}", prompt.category.label());
    if let Some(url) = prompt.media_url() {
        let _ = writeln!(out, "预览: {url}");
    }
    let _ = writeln!(out, "\n提示词模板:\n{}", prompt.description);
    if let Some(example) = prompt.example.as_deref() {
        let _ = writeln!(out, "\n使用案例:\n{example}");
    }
    if !prompt.tags.is_empty() {
        let _ = writeln!(out, "\n标签: {}", prompt.tags.join(", "));
    }
    if !prompt.professions.is_empty() {
        let _ = writeln!(out, "适合职业: {}", prompt.professions.join(", "));
    }
    if let Some(source) = prompt.source.as_deref() {
        let _ = writeln!(out, "来源: {source}");
    }
    out
}

/// Article list with pagination footer.
pub fn news(view: &NewsView) -> String {
    let mut out = String::from("== AI 资讯 ==\n");
    if view.page.is_out_of_range() {
        out.push_str("页码超出范围\n");
    } else if view.articles.is_empty() {
        out.push_str("暂无文章\n");
    }
    for article in &view.articles {
        out.push_str(&article_row(article));
    }
    out.push_str(&pagination(&view.page));
    out
}

fn article_row(article: &ArticleItem) -> String {
    let mut out = format!("#{} {}\n", article.id, article.title);
    if !article.description.trim().is_empty() {
        let _ = writeln!(out, "   {}", truncate(&article.description, PREVIEW_CHARS));
    }
    let _ = writeln!(
        out,
        "   {} · {} · {} 阅读",
        article.category, article.publish_date, article.views
    );
    out
}

/// `page x / y (n total)` line.
pub fn pagination(info: &PageInfo) -> String {
    format!("第 {} / {} 页，共 {} 条\n", info.page, info.total_pages, info.total)
}

/// Article detail, or the state that replaces it.
pub fn article_detail(detail: &ArticleDetail) -> String {
    match detail {
        ArticleDetail::Loaded(article) => {
            let mut out = format!("{}\n", article.title);
            let mut meta = vec![article.category.clone(), article.publish_date.clone()];
            if let Some(author) = article.author.as_deref() {
                meta.push(author.to_string());
            }
            meta.push(format!("{} 阅读", article.views));
            let _ = writeln!(out, "{}", meta.join(" · "));
            if !article.description.trim().is_empty() {
                let _ = writeln!(out, "\n{}", article.description);
            }
            let _ = writeln!(out, "\n{}", article.content);
            out
        },
        ArticleDetail::NotFound {
            ..
        } => format!("{ARTICLE_NOT_FOUND}\n"),
        ArticleDetail::Failed {
            message,
        } => format!("{message}\n"),
    }
}

/// Status line for a notice.
pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✔ {}", notice.message),
        NoticeLevel::Error => format!("✘ {}", notice.message),
    }
}
