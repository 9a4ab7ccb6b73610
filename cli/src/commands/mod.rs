pub mod browse;
pub mod news;
pub mod platforms;
pub mod prompts;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use ph_cli::{
    cli::{Cli, Commands},
    render::Style,
};
use prompt_hub_client::{ApiClient, ClientConfig};
use prompt_hub_shared::ArticleQuery;
use serde::Serialize;

pub async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::from_env().merge(cli.api.to_config());
    let api = ApiClient::new(&config).context("invalid API configuration")?;
    tracing::debug!(endpoints = ?api.endpoints(), "resolved endpoints");

    match cli.command {
        Commands::Platforms {
            category,
            json,
        } => platforms::run(&api, category, json).await,
        Commands::Prompts {
            category,
            search,
            tags,
            professions,
            page,
            page_size,
            json,
        } => {
            prompts::list(&api, prompts::ListArgs {
                category,
                search,
                tags,
                professions,
                page,
                page_size,
                json,
            })
            .await
        },
        Commands::Prompt {
            id,
            category,
            json,
        } => prompts::show(&api, &id, category, json).await,
        Commands::Copy {
            id,
            category,
            target,
        } => prompts::copy(&api, &id, category, target).await,
        Commands::News {
            category,
            search,
            page,
            page_size,
            json,
            interactive,
        } => {
            let query = ArticleQuery {
                page: page.max(1),
                page_size: page_size.max(1),
                category,
                search,
            };
            if interactive {
                news::pager(&api, query).await
            } else {
                news::list(&api, query, json).await
            }
        },
        Commands::Article {
            id,
            json,
        } => news::show_article(&api, &id, json).await,
        Commands::Browse {
            category,
        } => browse::run(api, category).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn stdout_style() -> Style {
    if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        Style::Color
    } else {
        Style::Plain
    }
}
