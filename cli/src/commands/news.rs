use anyhow::{bail, Result};
use ph_cli::{
    input::{self, NewsCommand},
    render,
};
use prompt_hub_client::{load_article, ArticleDetail, CatalogApi, NewsController, NewsEvent};
use prompt_hub_shared::ArticleQuery;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn list<A: CatalogApi>(api: &A, query: ArticleQuery, json: bool) -> Result<()> {
    let mut controller = NewsController::new(query);
    let fetch = controller.refresh();
    controller.run(api, fetch).await;

    if let Some(notice) = controller.take_notice() {
        bail!("{}", notice.message);
    }

    let view = controller.view();
    if json {
        return super::print_json(&serde_json::json!({
            "articles": view.articles,
            "page": view.page,
        }));
    }
    print!("{}", render::news(view));
    Ok(())
}

/// Interactive paging over the article list. Failed loads keep the current
/// page on screen and the session going.
pub async fn pager<A: CatalogApi>(api: &A, query: ArticleQuery) -> Result<()> {
    let mut controller = NewsController::new(query);
    let fetch = controller.refresh();
    controller.run(api, fetch).await;
    show(&mut controller);
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match input::parse_news_line(&line) {
            Ok(NewsCommand::Quit) => break,
            Ok(NewsCommand::Nothing) => continue,
            Ok(NewsCommand::Help) => {
                println!("{}", input::NEWS_HELP);
                continue;
            },
            Ok(NewsCommand::Open(id)) => {
                print!("{}", render::article_detail(&load_article(api, &id).await));
                continue;
            },
            Ok(NewsCommand::Next) => match controller.view().page.next() {
                Some(page) => NewsEvent::GoToPage(page),
                None => {
                    println!("already on the last page");
                    continue;
                },
            },
            Ok(NewsCommand::Prev) => match controller.view().page.prev() {
                Some(page) => NewsEvent::GoToPage(page),
                None => {
                    println!("already on the first page");
                    continue;
                },
            },
            Ok(NewsCommand::Page(page)) => NewsEvent::GoToPage(page),
            Ok(NewsCommand::Category(category)) => NewsEvent::SetCategory(category),
            Ok(NewsCommand::Search(search)) => NewsEvent::SetSearch(search),
            Err(message) => {
                println!("{message}");
                continue;
            },
        };

        match controller.apply(event) {
            Some(fetch) => {
                controller.run(api, fetch).await;
                show(&mut controller);
            },
            None => println!("(unchanged)"),
        }
    }
    Ok(())
}

fn show(controller: &mut NewsController) {
    print!("{}", render::news(controller.view()));
    if let Some(notice) = controller.take_notice() {
        println!("{}", render::notice(&notice));
    }
}

/// A missing article is a normal outcome; other failures exit non-zero.
pub async fn show_article<A: CatalogApi>(api: &A, id: &str, json: bool) -> Result<()> {
    let detail = load_article(api, id).await;
    match &detail {
        ArticleDetail::Loaded(article) if json => super::print_json(article),
        ArticleDetail::Failed {
            message,
        } => bail!("{message}"),
        _ => {
            print!("{}", render::article_detail(&detail));
            Ok(())
        },
    }
}
