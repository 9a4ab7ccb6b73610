use anyhow::{Context, Result};
use ph_cli::render;
use prompt_hub_client::CatalogApi;
use prompt_hub_shared::{Platform, PromptCategory};

pub async fn run<A: CatalogApi>(api: &A, category: Option<PromptCategory>, json: bool) -> Result<()> {
    let platforms = api
        .fetch_platforms()
        .await
        .context("获取平台列表失败")?;

    let categories = match category {
        Some(category) => vec![category],
        None => PromptCategory::ALL.to_vec(),
    };

    if json {
        let selected: Vec<&Platform> = platforms
            .iter()
            .filter(|platform| {
                categories
                    .iter()
                    .any(|category| category.chat_type() == platform.chat_type)
            })
            .collect();
        return super::print_json(&selected);
    }

    let style = super::stdout_style();
    for category in categories {
        println!("{}", render::quick_links(category, &platforms, style));
    }
    Ok(())
}
