//! Line commands of the interactive browser.

use prompt_hub_shared::PromptCategory;

use crate::cli::CopyTarget;

/// Help text of the catalog browser.
pub const HELP: &str = "\
commands:
  /<text>            search (settles 500ms after the last edit; `/` alone clears)
  cat <category>     switch to text | image | video
  tag <name>         toggle a required tag
  prof <name>        toggle an accepted profession
  clear              drop search, tags and professions
  show <n>           open prompt n
  copy <n>           copy prompt n's template
  template <n>       copy prompt n's template (detail view)
  example <n>        copy prompt n's example
  links              AI platform quick links for the category
  reload             fetch the current query again
  help               this text
  quit               leave";

/// Commands of the catalog browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Category(PromptCategory),
    Tag(String),
    Profession(String),
    Clear,
    Show(usize),
    Copy(usize, CopyTarget),
    Links,
    Reload,
    Help,
    Quit,
    Nothing,
}

/// Parse one input line.
pub fn parse_line(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(BrowseCommand::Nothing);
    }
    if let Some(search) = line.strip_prefix('/') {
        return Ok(BrowseCommand::Search(search.trim().to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "cat" | "category" => rest.parse().map(BrowseCommand::Category),
        "tag" => required(rest, "tag name").map(BrowseCommand::Tag),
        "prof" | "profession" => required(rest, "profession name").map(BrowseCommand::Profession),
        "clear" => Ok(BrowseCommand::Clear),
        "show" => index(rest).map(BrowseCommand::Show),
        "copy" => index(rest).map(|n| BrowseCommand::Copy(n, CopyTarget::Card)),
        "template" => index(rest).map(|n| BrowseCommand::Copy(n, CopyTarget::Template)),
        "example" => index(rest).map(|n| BrowseCommand::Copy(n, CopyTarget::Example)),
        "links" => Ok(BrowseCommand::Links),
        "reload" => Ok(BrowseCommand::Reload),
        "help" | "?" => Ok(BrowseCommand::Help),
        "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

fn required(value: &str, what: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(value.to_string())
    }
}

fn index(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("expected a card number, got `{value}`")),
    }
}

/// Help text of the news pager.
pub const NEWS_HELP: &str = "\
commands:
  n | next           next page
  p | prev           previous page
  page <n>           jump to page n (clamped to the last page)
  cat [<category>]   filter by article category; no name (or 全部) shows all
  /<text>            search; `/` alone clears
  open <id>          show one article
  help               this text
  quit               leave";

/// Commands of the news pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsCommand {
    Next,
    Prev,
    Page(u32),
    /// `None` shows every category.
    Category(Option<String>),
    Search(String),
    Open(String),
    Help,
    Quit,
    Nothing,
}

/// Parse one line typed into the news pager.
pub fn parse_news_line(line: &str) -> Result<NewsCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(NewsCommand::Nothing);
    }
    if let Some(search) = line.strip_prefix('/') {
        return Ok(NewsCommand::Search(search.trim().to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "n" | "next" => Ok(NewsCommand::Next),
        "p" | "prev" => Ok(NewsCommand::Prev),
        "page" | "go" => match rest.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(NewsCommand::Page(page)),
            _ => Err(format!("expected a page number, got `{rest}`")),
        },
        "cat" | "category" => {
            Ok(NewsCommand::Category((!rest.is_empty()).then(|| rest.to_string())))
        },
        "open" | "show" => required(rest, "article id").map(NewsCommand::Open),
        "help" | "?" => Ok(NewsCommand::Help),
        "quit" | "exit" | "q" => Ok(NewsCommand::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}
