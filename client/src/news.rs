//! News list and article detail.

use prompt_hub_shared::{ArticleItem, ArticleQuery, Notice, Page, PageInfo};

use crate::{
    api::CatalogApi,
    error::ApiError,
    sequence::{RequestSequence, RequestTicket},
};

/// Notice shown when the article list fails to load.
pub const LOAD_ARTICLES_FAILED: &str = "加载文章失败，请稍后重试";

/// Text of the "article not found" state.
pub const ARTICLE_NOT_FOUND: &str = "文章不存在";

/// A user action on the article list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsEvent {
    /// `None` (or the "all" sentinel) clears the category filter.
    SetCategory(Option<String>),
    /// Free-text search; blank clears it.
    SetSearch(String),
    /// Jump to a page, clamped once the total is known.
    GoToPage(u32),
}

/// An article-list request the caller must run and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingArticles {
    /// Ticket to hand back to [`NewsController::complete`].
    pub ticket: RequestTicket,
    /// Request to send.
    pub query: ArticleQuery,
}

/// What the news list currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsView {
    /// Articles of the last page that loaded.
    pub articles: Vec<ArticleItem>,
    /// Requested page and totals; the page may lie past the end.
    pub page: PageInfo,
    /// A fetch is in flight.
    pub loading: bool,
    /// Message to show once.
    pub notice: Option<Notice>,
}

/// Paged article list. Unlike the catalog, a failed load keeps the previous
/// page on screen.
#[derive(Debug)]
pub struct NewsController {
    query: ArticleQuery,
    sequence: RequestSequence,
    view: NewsView,
    loaded_once: bool,
}

impl NewsController {
    /// List that will load `query` on the first refresh.
    pub fn new(query: ArticleQuery) -> Self {
        let page = PageInfo::new(query.page, query.page_size, 0);
        Self {
            query,
            sequence: RequestSequence::new(),
            view: NewsView {
                articles: Vec::new(),
                page,
                loading: false,
                notice: None,
            },
            loaded_once: false,
        }
    }

    /// Query of the latest issued request.
    pub fn query(&self) -> &ArticleQuery {
        &self.query
    }

    /// What is on screen.
    pub fn view(&self) -> &NewsView {
        &self.view
    }

    /// Take the pending notice so it is shown once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.view.notice.take()
    }

    /// Issue a fetch for the current query.
    pub fn refresh(&mut self) -> PendingArticles {
        self.view.loading = true;
        PendingArticles {
            ticket: self.sequence.issue(),
            query: self.query.clone(),
        }
    }

    /// Category and search changes go back to page 1; page moves are clamped
    /// once the total is known.
    pub fn apply(&mut self, event: NewsEvent) -> Option<PendingArticles> {
        let mut next = self.query.clone();
        match event {
            NewsEvent::SetCategory(category) => {
                next.category = category;
                next.page = 1;
            },
            NewsEvent::SetSearch(search) => {
                next.search = Some(search);
                next.page = 1;
            },
            NewsEvent::GoToPage(page) => {
                next.page = if self.loaded_once {
                    self.view.page.clamp(page)
                } else {
                    page.max(1)
                };
            },
        }

        if next.to_params() == self.query.to_params() {
            return None;
        }
        self.query = next;
        Some(self.refresh())
    }

    /// Record the outcome of `ticket`. Returns whether the view changed.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Page<ArticleItem>, ApiError>,
    ) -> bool {
        if !self.sequence.is_latest(ticket) {
            tracing::debug!(ticket = ticket.get(), "discarding stale article response");
            return false;
        }

        self.view.loading = false;
        match result {
            Ok(page) => {
                self.view.page =
                    PageInfo::requested(self.query.page, self.query.page_size, page.total);
                self.view.articles = page.items;
                self.loaded_once = true;
            },
            Err(err) => {
                tracing::error!("加载文章失败: {err}");
                self.view.notice = Some(Notice::error(LOAD_ARTICLES_FAILED));
            },
        }
        true
    }

    /// Fetch for the last page when the loaded page turned out to lie past it.
    pub fn follow_last_page(&mut self) -> Option<PendingArticles> {
        if !self.loaded_once || !self.view.page.is_out_of_range() {
            return None;
        }
        let last = self.view.page.total_pages;
        tracing::debug!(requested = self.query.page, last, "article page past the end");
        self.apply(NewsEvent::GoToPage(last))
    }

    /// Run `fetch`, then move to the last page if it was past the end.
    pub async fn run<A: CatalogApi + ?Sized>(&mut self, api: &A, fetch: PendingArticles) -> bool {
        let mut fetch = fetch;
        loop {
            let result = api.fetch_articles(&fetch.query).await;
            let changed = self.complete(fetch.ticket, result);
            match self.follow_last_page() {
                Some(next) if changed => fetch = next,
                _ => return changed,
            }
        }
    }
}

/// Outcome of opening one article.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleDetail {
    /// The article.
    Loaded(ArticleItem),
    /// The server answered 404.
    NotFound {
        /// Id that was requested.
        id: String,
    },
    /// Any other failure, already turned into a message.
    Failed {
        /// Text to show instead of the article.
        message: String,
    },
}

/// Load one article, folding every failure into a displayable state.
pub async fn load_article<A: CatalogApi + ?Sized>(api: &A, id: &str) -> ArticleDetail {
    match api.fetch_article(id).await {
        Ok(article) => ArticleDetail::Loaded(article),
        Err(err) if err.is_not_found() => ArticleDetail::NotFound {
            id: id.to_string(),
        },
        Err(err) => {
            tracing::error!(article_id = id, "获取文章详情失败: {err}");
            ArticleDetail::Failed {
                message: LOAD_ARTICLES_FAILED.to_string(),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use prompt_hub_shared::{query::ALL_ARTICLE_CATEGORIES, Platform, PromptItem, PromptQuery};

    use super::*;

    /// Serves `total` articles, ten to a page, and records the pages asked for.
    struct PagedArticles {
        total: u64,
        requested: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl CatalogApi for PagedArticles {
        async fn fetch_platforms(&self) -> Result<Vec<Platform>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_prompts(&self, _query: &PromptQuery) -> Result<Page<PromptItem>, ApiError> {
            Ok(Page {
                items: Vec::new(),
                page: 1,
                page_size: 1000,
                total: 0,
            })
        }

        async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Page<ArticleItem>, ApiError> {
            if let Ok(mut requested) = self.requested.lock() {
                requested.push(query.page);
            }
            let start = u64::from(query.page - 1) * u64::from(query.page_size);
            let end = (start + u64::from(query.page_size)).min(self.total);
            Ok(Page {
                items: (start..end).map(|n| article(&n.to_string())).collect(),
                page: query.page,
                page_size: query.page_size,
                total: self.total,
            })
        }

        async fn fetch_article(&self, id: &str) -> Result<ArticleItem, ApiError> {
            Err(ApiError::NotFound {
                resource: "article",
                id: id.to_string(),
            })
        }
    }

    fn article(id: &str) -> ArticleItem {
        ArticleItem {
            id: id.to_string(),
            title: format!("article {id}"),
            description: String::new(),
            content: String::new(),
            category: "行业动态".to_string(),
            publish_date: "2024-06-01".to_string(),
            views: 3,
            author: None,
        }
    }

    fn page(ids: &[&str], total: u64) -> Page<ArticleItem> {
        Page {
            items: ids.iter().map(|id| article(id)).collect(),
            page: 1,
            page_size: 10,
            total,
        }
    }

    #[test]
    fn failed_load_keeps_previous_page() {
        let mut controller = NewsController::new(ArticleQuery::default());
        let first = controller.refresh();
        controller.complete(first.ticket, Ok(page(&["1", "2"], 2)));

        let second = controller.refresh();
        let err = ApiError::Protocol(crate::error::ProtocolError::HttpStatus(500));
        assert!(controller.complete(second.ticket, Err(err)));
        assert_eq!(controller.view().articles.len(), 2);
        assert_eq!(
            controller.take_notice().map(|notice| notice.message),
            Some(LOAD_ARTICLES_FAILED.to_string())
        );
    }

    #[test]
    fn page_moves_are_clamped_after_first_load() {
        let mut controller = NewsController::new(ArticleQuery::default());
        let first = controller.refresh();
        controller.complete(first.ticket, Ok(page(&["1"], 25)));
        assert_eq!(controller.view().page.total_pages, 3);

        let fetch = controller
            .apply(NewsEvent::GoToPage(9))
            .expect("page change");
        assert_eq!(fetch.query.page, 3);
    }

    #[test]
    fn category_change_resets_page_and_all_is_a_noop() {
        let mut controller = NewsController::new(ArticleQuery {
            page: 2,
            ..ArticleQuery::default()
        });
        let fetch = controller
            .apply(NewsEvent::SetCategory(Some("行业动态".to_string())))
            .expect("category change");
        assert_eq!(fetch.query.page, 1);

        let mut fresh = NewsController::new(ArticleQuery::default());
        assert_eq!(
            fresh.apply(NewsEvent::SetCategory(Some(ALL_ARTICLE_CATEGORIES.to_string()))),
            None
        );
    }

    #[test]
    fn page_past_the_end_is_shown_as_requested() {
        let mut controller = NewsController::new(ArticleQuery {
            page: 99,
            ..ArticleQuery::default()
        });
        let fetch = controller.refresh();
        controller.complete(fetch.ticket, Ok(page(&[], 25)));

        let view = controller.view();
        assert_eq!(view.page.page, fetch.query.page);
        assert_eq!(view.page.total_pages, 3);
        assert!(view.page.is_out_of_range());

        let last = controller.follow_last_page().expect("move to last page");
        assert_eq!(last.query.page, 3);
    }

    #[tokio::test]
    async fn run_lands_on_the_last_page() {
        let api = PagedArticles {
            total: 25,
            requested: Mutex::new(Vec::new()),
        };
        let mut controller = NewsController::new(ArticleQuery {
            page: 99,
            ..ArticleQuery::default()
        });
        let fetch = controller.refresh();
        assert!(controller.run(&api, fetch).await);

        let view = controller.view();
        assert_eq!(view.page.page, 3);
        assert_eq!(controller.query().page, 3);
        assert_eq!(view.articles.len(), 5);
        assert_eq!(*api.requested.lock().expect("lock"), vec![99, 3]);
        assert_eq!(controller.follow_last_page(), None);
    }

    #[tokio::test]
    async fn next_and_prev_walk_the_list() {
        let api = PagedArticles {
            total: 25,
            requested: Mutex::new(Vec::new()),
        };
        let mut controller = NewsController::new(ArticleQuery::default());
        let fetch = controller.refresh();
        controller.run(&api, fetch).await;

        let next = controller.view().page.next().expect("second page");
        let fetch = controller
            .apply(NewsEvent::GoToPage(next))
            .expect("page change");
        controller.run(&api, fetch).await;
        assert_eq!(controller.view().page.page, 2);
        assert_eq!(controller.view().articles[0].id, "10");

        assert_eq!(controller.view().page.prev(), Some(1));
    }
}
