//! Prompt catalog controller.
//!
//! Owns the current [`QueryState`] and what is on screen. Filter events go in
//! through [`CatalogController::apply`], which hands back the single fetch the
//! caller has to run; results come back through
//! [`CatalogController::complete`], which drops anything but the latest.

use prompt_hub_shared::{
    collect_facets, Facets, Notice, Page, PromptCategory, PromptItem, PromptQuery, QueryEvent,
    QueryState,
};

use crate::{
    api::CatalogApi,
    error::ApiError,
    sequence::{RequestSequence, RequestTicket},
};

/// Notice shown when a catalog load fails.
pub const LOAD_PROMPTS_FAILED: &str = "加载提示词失败，请稍后重试";

/// A request the caller must run and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    /// Ticket to hand back to [`CatalogController::complete`].
    pub ticket: RequestTicket,
    /// Request to send.
    pub query: PromptQuery,
}

/// What the catalog currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    /// Prompts that pass the current filters.
    pub prompts: Vec<PromptItem>,
    /// Filter options, from the last successful load.
    pub facets: Facets,
    /// Number of prompts on screen after client-side filtering.
    pub total: u64,
    /// Number of prompts the server reported for the query.
    pub server_total: u64,
    /// A fetch for the current state is in flight.
    pub loading: bool,
    /// Message to show once.
    pub notice: Option<Notice>,
}

/// State machine behind the catalog view.
#[derive(Debug)]
pub struct CatalogController {
    state: QueryState,
    sequence: RequestSequence,
    view: CatalogView,
}

impl CatalogController {
    /// Unfiltered catalog of `category`.
    pub fn new(category: PromptCategory) -> Self {
        Self::with_state(QueryState::new(category))
    }

    /// Catalog starting from an arbitrary query state.
    pub fn with_state(state: QueryState) -> Self {
        Self {
            state,
            sequence: RequestSequence::new(),
            view: CatalogView::default(),
        }
    }

    /// Current query state.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// What is on screen.
    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Take the pending notice so it is shown once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.view.notice.take()
    }

    /// Prompt by id among those on screen.
    pub fn find(&self, id: &str) -> Option<&PromptItem> {
        self.view.prompts.iter().find(|prompt| prompt.id == id)
    }

    /// Issue a fetch for the current state (initial load, manual reload).
    pub fn refresh(&mut self) -> PendingFetch {
        self.view.loading = true;
        PendingFetch {
            ticket: self.sequence.issue(),
            query: self.state.to_prompt_query(),
        }
    }

    /// Apply a filter event; `None` when it changed nothing.
    pub fn apply(&mut self, event: QueryEvent) -> Option<PendingFetch> {
        let next = self.state.apply(event)?;
        tracing::debug!(?next, "catalog query changed");
        self.state = next;
        Some(self.refresh())
    }

    /// Record the outcome of `ticket`. Returns whether the view changed.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Page<PromptItem>, ApiError>,
    ) -> bool {
        if !self.sequence.is_latest(ticket) {
            tracing::debug!(ticket = ticket.get(), "discarding stale prompt response");
            return false;
        }

        self.view.loading = false;
        match result {
            Ok(page) => {
                self.view.facets = collect_facets(&page.items);
                self.view.server_total = page.total;
                self.view.prompts = page
                    .items
                    .into_iter()
                    .filter(|prompt| self.state.matches(prompt))
                    .collect();
                self.view.total = self.view.prompts.len() as u64;
            },
            Err(err) => {
                tracing::error!("加载提示词失败: {err}");
                self.view.prompts.clear();
                self.view.total = 0;
                self.view.server_total = 0;
                self.view.notice = Some(Notice::error(LOAD_PROMPTS_FAILED));
            },
        }
        true
    }

    /// Run `fetch` against `api` and record the result.
    pub async fn run<A: CatalogApi + ?Sized>(&mut self, api: &A, fetch: PendingFetch) -> bool {
        let result = api.fetch_prompts(&fetch.query).await;
        self.complete(fetch.ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    fn prompt(id: &str, tags: &[&str], professions: &[&str]) -> PromptItem {
        PromptItem {
            id: id.to_string(),
            category: PromptCategory::Text,
            title: format!("prompt {id}"),
            description: "template".to_string(),
            example: None,
            image_url: None,
            video_url: None,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            source: None,
            professions: professions.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn page(items: Vec<PromptItem>) -> Page<PromptItem> {
        Page {
            total: items.len() as u64,
            items,
            page: 1,
            page_size: 1000,
        }
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_one() {
        let mut controller = CatalogController::new(PromptCategory::Text);
        let first = controller.refresh();
        let second = controller
            .apply(QueryEvent::SearchSettled("report".to_string()))
            .expect("search change");

        assert!(controller.complete(second.ticket, Ok(page(vec![prompt("2", &[], &[])]))));
        assert!(!controller.complete(first.ticket, Ok(page(vec![prompt("1", &[], &[])]))));

        let ids: Vec<&str> = controller
            .view()
            .prompts
            .iter()
            .map(|prompt| prompt.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2"]);
        assert!(!controller.view().loading);
    }

    #[test]
    fn stale_failure_is_ignored_too() {
        let mut controller = CatalogController::new(PromptCategory::Text);
        let first = controller.refresh();
        let second = controller
            .apply(QueryEvent::ToggleTag("seo".to_string()))
            .expect("tag change");

        assert!(controller.complete(second.ticket, Ok(page(vec![prompt("5", &["seo"], &[])]))));
        let stale = Err(ApiError::Protocol(ProtocolError::HttpStatus(502)));
        assert!(!controller.complete(first.ticket, stale));
        assert_eq!(controller.view().prompts.len(), 1);
        assert_eq!(controller.view().notice, None);
    }

    #[test]
    fn every_filter_change_issues_one_fetch_on_page_one() {
        let mut controller = CatalogController::new(PromptCategory::Text);
        controller
            .apply(QueryEvent::GoToPage(4))
            .expect("page change");

        let fetch = controller
            .apply(QueryEvent::ToggleProfession("writer".to_string()))
            .expect("profession change");
        assert_eq!(fetch.query.page, 1);
        assert_eq!(fetch.query.professions, vec!["writer".to_string()]);

        assert_eq!(controller.apply(QueryEvent::SetCategory(PromptCategory::Text)), None);
    }

    #[test]
    fn failure_clears_prompts_and_raises_notice() {
        let mut controller = CatalogController::new(PromptCategory::Image);
        let first = controller.refresh();
        controller.complete(first.ticket, Ok(page(vec![prompt("1", &["anime"], &[])])));

        let second = controller.refresh();
        let failed = Err(ApiError::Protocol(ProtocolError::Envelope {
            code: 1,
            message: "boom".to_string(),
        }));
        assert!(controller.complete(second.ticket, failed));
        assert!(controller.view().prompts.is_empty());
        assert_eq!(controller.view().facets.tags, vec!["anime".to_string()]);

        let notice = controller.take_notice().expect("notice");
        assert!(notice.is_error());
        assert_eq!(notice.message, LOAD_PROMPTS_FAILED);
        assert_eq!(controller.take_notice(), None);
    }

    #[test]
    fn client_side_guard_applies_mixed_policy() {
        let mut controller = CatalogController::new(PromptCategory::Text);
        controller.apply(QueryEvent::ToggleTag("seo".to_string()));
        controller.apply(QueryEvent::ToggleTag("blog".to_string()));
        let fetch = controller
            .apply(QueryEvent::SetProfessions(
                ["writer", "marketer"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ))
            .expect("profession change");

        let items = vec![
            prompt("1", &["seo", "blog"], &["marketer"]),
            prompt("2", &["seo"], &["writer"]),
            prompt("3", &["seo", "blog"], &["nurse"]),
        ];
        controller.complete(fetch.ticket, Ok(page(items)));

        let ids: Vec<&str> = controller
            .view()
            .prompts
            .iter()
            .map(|prompt| prompt.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn total_counts_what_is_shown() {
        let mut controller = CatalogController::new(PromptCategory::Text);
        let fetch = controller
            .apply(QueryEvent::ToggleTag("seo".to_string()))
            .expect("tag change");

        let mut server_page = page(vec![prompt("1", &["seo"], &[]), prompt("2", &["blog"], &[])]);
        server_page.total = 40;
        controller.complete(fetch.ticket, Ok(server_page));

        let view = controller.view();
        assert_eq!(view.prompts.len(), 1);
        assert_eq!(view.total, 1);
        assert_eq!(view.server_total, 40);
    }
}
