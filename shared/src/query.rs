//! Catalog and news query state.
//!
//! A [`QueryState`] is an immutable value: every UI event produces a new state
//! (or nothing, when the event changes nothing), and each new state maps to
//! exactly one request via [`QueryState::to_prompt_query`].

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{PromptCategory, PromptItem};

/// Catalog page size: the catalog loads a whole category at once.
pub const DEFAULT_CATALOG_PAGE_SIZE: u32 = 1000;

/// News list page size.
pub const DEFAULT_NEWS_PAGE_SIZE: u32 = 10;

/// Article category meaning "no category filter".
pub const ALL_ARTICLE_CATEGORIES: &str = "全部";

/// Filter and pagination state of the prompt catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub category: PromptCategory,
    /// Settled (debounced) search text.
    pub search: String,
    /// Every one of these must be on a prompt.
    pub tags: BTreeSet<String>,
    /// At least one of these must be on a prompt, when any are selected.
    pub professions: BTreeSet<String>,
    pub page: u32,
    pub page_size: u32,
}

/// A user action on the catalog filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    /// Switch prompt family; selected tags and professions are kept.
    SetCategory(PromptCategory),
    /// The search box settled on this text.
    SearchSettled(String),
    /// Add the tag if absent, remove it otherwise.
    ToggleTag(String),
    /// Replace the selected tags.
    SetTags(BTreeSet<String>),
    /// Add the profession if absent, remove it otherwise.
    ToggleProfession(String),
    /// Replace the selected professions.
    SetProfessions(BTreeSet<String>),
    /// Drop search, tags and professions.
    ClearFilters,
    /// Move to a page (at least 1) without touching the filters.
    GoToPage(u32),
}

impl QueryState {
    /// Unfiltered first page of `category`.
    pub fn new(category: PromptCategory) -> Self {
        Self {
            category,
            search: String::new(),
            tags: BTreeSet::new(),
            professions: BTreeSet::new(),
            page: 1,
            page_size: DEFAULT_CATALOG_PAGE_SIZE,
        }
    }

    /// Same state with another page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Apply `event`, returning the next state, or `None` when nothing changed.
    ///
    /// Filter changes always land on page 1.
    pub fn apply(&self, event: QueryEvent) -> Option<QueryState> {
        let mut next = self.clone();
        match event {
            QueryEvent::SetCategory(category) => next.category = category,
            QueryEvent::SearchSettled(search) => next.search = search.trim().to_string(),
            QueryEvent::ToggleTag(tag) => toggle(&mut next.tags, tag),
            QueryEvent::SetTags(tags) => next.tags = tags,
            QueryEvent::ToggleProfession(profession) => toggle(&mut next.professions, profession),
            QueryEvent::SetProfessions(professions) => next.professions = professions,
            QueryEvent::ClearFilters => {
                next.search.clear();
                next.tags.clear();
                next.professions.clear();
            },
            QueryEvent::GoToPage(page) => {
                next.page = page.max(1);
                return (next != *self).then_some(next);
            },
        }

        if next.filters_equal(self) {
            return None;
        }
        next.page = 1;
        Some(next)
    }

    fn filters_equal(&self, other: &QueryState) -> bool {
        self.category == other.category
            && self.search == other.search
            && self.tags == other.tags
            && self.professions == other.professions
    }

    /// Whether any narrowing filter is active.
    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty() || !self.tags.is_empty() || !self.professions.is_empty()
    }

    /// Tags must all be present; professions need at least one match.
    ///
    /// An empty selection places no constraint on its side.
    pub fn matches(&self, item: &PromptItem) -> bool {
        let has_all_tags = self.tags.iter().all(|tag| item.has_tag(tag));
        let has_any_profession = self.professions.is_empty()
            || self
                .professions
                .iter()
                .any(|profession| item.has_profession(profession));
        has_all_tags && has_any_profession
    }

    /// The request this state stands for.
    pub fn to_prompt_query(&self) -> PromptQuery {
        let search = self.search.trim();
        PromptQuery {
            category: self.category,
            page: self.page,
            page_size: self.page_size,
            search: (!search.is_empty()).then(|| search.to_string()),
            tags: self.tags.iter().cloned().collect(),
            professions: self.professions.iter().cloned().collect(),
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Canonical `GET /api/prompts` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptQuery {
    pub category: PromptCategory,
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub professions: Vec<String>,
}

impl PromptQuery {
    /// Query string pairs; empty filters are omitted, lists are comma-joined.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("category", self.category.as_str().to_string()),
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(search) = self.search.as_ref() {
            params.push(("search", search.clone()));
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.join(",")));
        }
        if !self.professions.is_empty() {
            params.push(("professions", self.professions.join(",")));
        }
        params
    }
}

/// `GET /api/articles` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleQuery {
    pub page: u32,
    pub page_size: u32,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_NEWS_PAGE_SIZE,
            category: None,
            search: None,
        }
    }
}

impl ArticleQuery {
    /// Query string pairs; the "all" category and blank values are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.max(1).to_string()),
            ("pageSize", self.page_size.max(1).to_string()),
        ];
        if let Some(category) = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty() && *category != ALL_ARTICLE_CATEGORIES)
        {
            params.push(("category", category.to_string()));
        }
        if let Some(search) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
        {
            params.push(("search", search.to_string()));
        }
        params
    }
}

/// Where a page sits in a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

impl PageInfo {
    /// `page` is clamped into `1..=total_pages`; an empty set has one page.
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let total_pages = calculate_total_pages(total, page_size);
        Self {
            page: clamp_page(page, total_pages),
            total_pages,
            total,
        }
    }

    /// Like [`PageInfo::new`] but keeps `page` as requested, so a page past
    /// the end stays visible as such.
    pub fn requested(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            total_pages: calculate_total_pages(total, page_size),
            total,
        }
    }

    /// Whether `page` lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }

    /// Page after this one, if any.
    pub fn next(&self) -> Option<u32> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }

    /// Page before this one, if any.
    pub fn prev(&self) -> Option<u32> {
        (self.page > 1).then(|| clamp_page(self.page - 1, self.total_pages))
    }

    /// Clamp an arbitrary requested page into range.
    pub fn clamp(&self, page: u32) -> u32 {
        clamp_page(page, self.total_pages)
    }
}

fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.max(1).min(total_pages.max(1))
}

fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
    let per_page = u64::from(page_size.max(1));
    if total == 0 {
        1
    } else {
        let pages = total.saturating_add(per_page - 1) / per_page;
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }
}
