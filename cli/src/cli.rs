//! Command-line definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use prompt_hub_client::ClientConfig;
use prompt_hub_shared::{
    query::{DEFAULT_CATALOG_PAGE_SIZE, DEFAULT_NEWS_PAGE_SIZE},
    PromptCategory,
};

/// What a copy action copies, and which message confirms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyTarget {
    /// Template body, copied from a catalog card.
    Card,
    /// Template body, copied from the detail view.
    Template,
    /// The usage example.
    Example,
}

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "ph-cli", version, about = "Prompt Hub catalog and news browser")]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Endpoint settings; each one overrides the matching `PROMPT_HUB_*` variable.
#[derive(Debug, Clone, Default, Args)]
pub struct ApiArgs {
    /// Origin the client runs against. Non-local origins use the hosted API.
    #[arg(long, global = true)]
    pub origin: Option<String>,
    /// Explicit platforms endpoint URL.
    #[arg(long, global = true)]
    pub platforms_url: Option<String>,
    /// Explicit prompts endpoint URL.
    #[arg(long, global = true)]
    pub prompts_url: Option<String>,
    /// Explicit articles endpoint URL.
    #[arg(long, global = true)]
    pub articles_url: Option<String>,
    /// HTTP(S) proxy for all requests.
    #[arg(long, global = true)]
    pub proxy_url: Option<String>,
}

impl ApiArgs {
    /// Settings to merge over the environment.
    pub fn to_config(&self) -> ClientConfig {
        ClientConfig {
            origin: self.origin.clone(),
            platforms_url: self.platforms_url.clone(),
            prompts_url: self.prompts_url.clone(),
            articles_url: self.articles_url.clone(),
            proxy_url: self.proxy_url.clone(),
        }
    }
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List AI platform quick links.
    Platforms {
        /// Only the platforms for this prompt category.
        #[arg(long)]
        category: Option<PromptCategory>,
        /// Print display records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List prompts of one category.
    Prompts {
        /// text, image or video.
        #[arg(long, default_value = "text")]
        category: PromptCategory,
        /// Free-text search.
        #[arg(long)]
        search: Option<String>,
        /// Required tag (repeatable; all must match).
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Accepted profession (repeatable; any may match).
        #[arg(long = "profession")]
        professions: Vec<String>,
        /// Page to show.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Prompts per page.
        #[arg(long, default_value_t = DEFAULT_CATALOG_PAGE_SIZE)]
        page_size: u32,
        /// Print display records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show one prompt in full.
    Prompt {
        /// Prompt id.
        id: String,
        /// Category the prompt belongs to.
        #[arg(long, default_value = "text")]
        category: PromptCategory,
        /// Print the display record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Copy a prompt to the clipboard.
    Copy {
        /// Prompt id.
        id: String,
        /// Category the prompt belongs to.
        #[arg(long, default_value = "text")]
        category: PromptCategory,
        /// What to copy.
        #[arg(long, value_enum, default_value_t = CopyTarget::Card)]
        target: CopyTarget,
    },
    /// List news articles.
    News {
        /// Article category (`全部` for all).
        #[arg(long)]
        category: Option<String>,
        /// Free-text search.
        #[arg(long)]
        search: Option<String>,
        /// Page to show.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Articles per page.
        #[arg(long, default_value_t = DEFAULT_NEWS_PAGE_SIZE)]
        page_size: u32,
        /// Print display records as JSON.
        #[arg(long, conflicts_with = "interactive")]
        json: bool,
        /// Page through the list interactively (type `help` inside).
        #[arg(short, long)]
        interactive: bool,
    },
    /// Show one article.
    Article {
        /// Article id.
        id: String,
        /// Print the display record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interactive catalog browser (type `help` inside).
    Browse {
        /// Category to open with.
        #[arg(long, default_value = "text")]
        category: PromptCategory,
    },
}
