//! Interactive catalog session.
//!
//! One loop multiplexes three sources: stdin commands, the search debounce
//! deadline and finished fetches. Fetches run as tasks so typing never waits
//! on the network; the controller keeps only the latest response.

use anyhow::Result;
use ph_cli::{
    cli::CopyTarget,
    clipboard,
    input::{self, BrowseCommand},
    render::{self, Style},
};
use prompt_hub_client::{
    ApiClient, ApiError, CatalogApi, CatalogController, Debouncer, PendingFetch, RequestTicket,
};
use prompt_hub_shared::{Page, Platform, PromptCategory, PromptItem, QueryEvent};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::{sleep_until, Instant},
};

type FetchResult = (RequestTicket, Result<Page<PromptItem>, ApiError>);

struct Browser {
    api: ApiClient,
    results: mpsc::UnboundedSender<FetchResult>,
    controller: CatalogController,
    search: Debouncer<String>,
    platforms: Vec<Platform>,
    style: Style,
}

impl Browser {
    fn spawn(&self, fetch: PendingFetch) {
        let api = self.api.clone();
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = api.fetch_prompts(&fetch.query).await;
            // The receiver only goes away when the session ends.
            let _ = results.send((fetch.ticket, result));
        });
    }

    fn apply(&mut self, event: QueryEvent) {
        match self.controller.apply(event) {
            Some(fetch) => self.spawn(fetch),
            None => println!("(unchanged)"),
        }
    }

    fn show(&mut self) {
        print!("{}", render::catalog(self.controller.state(), self.controller.view()));
        if let Some(notice) = self.controller.take_notice() {
            println!("{}", render::notice(&notice));
        }
    }

    fn prompt_at(&self, number: usize) -> Option<&PromptItem> {
        let prompt = number
            .checked_sub(1)
            .and_then(|index| self.controller.view().prompts.get(index));
        if prompt.is_none() {
            println!("no card {number}");
        }
        prompt
    }

    /// Returns `false` once the session should end.
    fn dispatch(&mut self, command: BrowseCommand) -> bool {
        match command {
            BrowseCommand::Search(text) => self.search.push(text),
            BrowseCommand::Category(category) => self.apply(QueryEvent::SetCategory(category)),
            BrowseCommand::Tag(tag) => self.apply(QueryEvent::ToggleTag(tag)),
            BrowseCommand::Profession(profession) => {
                self.apply(QueryEvent::ToggleProfession(profession))
            },
            BrowseCommand::Clear => {
                self.search.cancel();
                self.apply(QueryEvent::ClearFilters);
            },
            BrowseCommand::Show(number) => {
                if let Some(prompt) = self.prompt_at(number) {
                    print!("{}", render::prompt_detail(prompt));
                }
            },
            BrowseCommand::Copy(number, target) => self.copy(number, target),
            BrowseCommand::Links => {
                let category = self.controller.state().category;
                println!("{}", render::quick_links(category, &self.platforms, self.style));
            },
            BrowseCommand::Reload => {
                let fetch = self.controller.refresh();
                self.spawn(fetch);
            },
            BrowseCommand::Help => println!("{}", input::HELP),
            BrowseCommand::Quit => return false,
            BrowseCommand::Nothing => {},
        }
        true
    }

    fn copy(&mut self, number: usize, target: CopyTarget) {
        if let Some(prompt) = self.prompt_at(number) {
            let notice = clipboard::copy_prompt(prompt, target);
            println!("{}", render::notice(&notice));
        }
    }
}

async fn load_platforms(api: &ApiClient) -> Vec<Platform> {
    match api.fetch_platforms().await {
        Ok(platforms) => platforms,
        Err(err) => {
            // Quick links are optional; the catalog still works without them.
            tracing::warn!("platform list unavailable: {err}");
            Vec::new()
        },
    }
}

pub async fn run(api: ApiClient, category: PromptCategory) -> Result<()> {
    let (results, mut finished) = mpsc::unbounded_channel();
    let platforms = load_platforms(&api).await;

    let mut browser = Browser {
        api,
        results,
        controller: CatalogController::new(category),
        search: Debouncer::default(),
        platforms,
        style: super::stdout_style(),
    };
    println!("{}", render::quick_links(category, &browser.platforms, browser.style));
    println!("type `help` for commands");

    let fetch = browser.controller.refresh();
    browser.spawn(fetch);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = browser.search.deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match input::parse_line(&line) {
                    Ok(command) => {
                        if !browser.dispatch(command) {
                            break;
                        }
                    },
                    Err(message) => println!("{message}"),
                }
            },
            Some((ticket, result)) = finished.recv() => {
                if browser.controller.complete(ticket, result) {
                    browser.show();
                }
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(search) = browser.search.take_settled(Instant::now()) {
                    tracing::debug!(%search, "search settled");
                    browser.apply(QueryEvent::SearchSettled(search));
                }
            },
        }
    }
    Ok(())
}
