//! Client side of Prompt Hub: API access, request sequencing and the
//! controllers that turn filter events into requests.
//!
//! ```no_run
//! use prompt_hub_client::{ApiClient, CatalogController};
//! use prompt_hub_shared::{PromptCategory, QueryEvent};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let api = ApiClient::from_env()?;
//! let mut catalog = CatalogController::new(PromptCategory::Image);
//! let fetch = catalog.refresh();
//! catalog.run(&api, fetch).await;
//!
//! if let Some(fetch) = catalog.apply(QueryEvent::ToggleTag("anime".to_string())) {
//!     catalog.run(&api, fetch).await;
//! }
//! println!("{} prompts", catalog.view().prompts.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod news;
pub mod sequence;

pub use api::{ApiClient, CatalogApi};
pub use catalog::{CatalogController, CatalogView, PendingFetch};
pub use config::{ClientConfig, Endpoint};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{ApiError, ConfigError, ProtocolError};
pub use news::{load_article, ArticleDetail, NewsController, NewsEvent};
pub use sequence::{RequestSequence, RequestTicket};
