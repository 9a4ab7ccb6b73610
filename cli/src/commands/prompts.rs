use anyhow::{bail, Result};
use ph_cli::{cli::CopyTarget, clipboard, render};
use prompt_hub_client::{CatalogApi, CatalogController};
use prompt_hub_shared::{Facets, PromptCategory, PromptItem, QueryState};
use serde::Serialize;

pub struct ListArgs {
    pub category: PromptCategory,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub professions: Vec<String>,
    pub page: u32,
    pub page_size: u32,
    pub json: bool,
}

#[derive(Serialize)]
struct CatalogOutput<'a> {
    category: PromptCategory,
    total: u64,
    server_total: u64,
    prompts: &'a [PromptItem],
    facets: &'a Facets,
}

/// Load one category with the given filters, failing on a load notice.
async fn load<A: CatalogApi>(api: &A, state: QueryState) -> Result<CatalogController> {
    let mut controller = CatalogController::with_state(state);
    let fetch = controller.refresh();
    controller.run(api, fetch).await;

    if let Some(notice) = controller.take_notice() {
        if notice.is_error() {
            bail!("{}", notice.message);
        }
        eprintln!("{}", render::notice(&notice));
    }
    Ok(controller)
}

pub async fn list<A: CatalogApi>(api: &A, args: ListArgs) -> Result<()> {
    let mut state = QueryState::new(args.category).with_page_size(args.page_size);
    state.search = args.search.unwrap_or_default();
    state.tags = args.tags.into_iter().collect();
    state.professions = args.professions.into_iter().collect();
    state.page = args.page.max(1);

    let controller = load(api, state).await?;
    let view = controller.view();

    if args.json {
        return super::print_json(&CatalogOutput {
            category: controller.state().category,
            total: view.total,
            server_total: view.server_total,
            prompts: &view.prompts,
            facets: &view.facets,
        });
    }
    print!("{}", render::catalog(controller.state(), view));
    Ok(())
}

async fn find<A: CatalogApi>(api: &A, id: &str, category: PromptCategory) -> Result<PromptItem> {
    let controller = load(api, QueryState::new(category)).await?;
    match controller.find(id) {
        Some(prompt) => Ok(prompt.clone()),
        None => bail!("提示词不存在: {id} ({})", category.label()),
    }
}

pub async fn show<A: CatalogApi>(api: &A, id: &str, category: PromptCategory, json: bool) -> Result<()> {
    let prompt = find(api, id, category).await?;
    if json {
        return super::print_json(&prompt);
    }
    print!("{}", render::prompt_detail(&prompt));
    Ok(())
}

pub async fn copy<A: CatalogApi>(
    api: &A,
    id: &str,
    category: PromptCategory,
    target: CopyTarget,
) -> Result<()> {
    let prompt = find(api, id, category).await?;
    let notice = clipboard::copy_prompt(&prompt, target);
    if notice.is_error() {
        bail!("{}", notice.message);
    }
    eprintln!("{}", render::notice(&notice));
    Ok(())
}
