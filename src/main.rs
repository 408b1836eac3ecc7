//! `hn-rerank` terminal entrypoint.
//!
//! Each input line is an interest statement; the cached stories are printed
//! ranked by it. `:refresh` refetches (and recaches) the top stories before
//! ranking with the last interests, `:quit` exits.

use std::io::Write;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::io::{AsyncBufReadExt, BufReader};

use hn_rerank::config::Config;
use hn_rerank::fetch::{HnClient, StoryFetcher};
use hn_rerank::model::RerankerConfig;
use hn_rerank::ranking::StoryRanker;
use hn_rerank::session::{CollectionOrigin, ReaderSession};
use hn_rerank::storage::StoryCache;
use hn_rerank::story::render_listing;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const REFRESH_COMMAND: &str = ":refresh";
const QUIT_COMMANDS: [&str; 2] = [":quit", ":q"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        api = %config.api_base_url,
        cache = %config.cache_path.display(),
        limit = config.story_limit,
        concurrency = config.fetch_concurrency,
        "hn-rerank starting"
    );

    let cache = Arc::new(StoryCache::new(config.cache_path.clone()));
    let client = HnClient::from_config(&config)?;
    let fetcher = StoryFetcher::new(client, cache).with_concurrency(config.fetch_concurrency);

    let reranker_config = RerankerConfig::from_config(&config);
    if reranker_config.model_path.is_none() {
        tracing::warn!("No HNR_RERANKER_PATH configured, ranking with the lexical stub scorer");
    }
    let ranker = tokio::task::spawn_blocking(move || StoryRanker::load(reranker_config)).await??;

    println!("Hacker News Top Stories Reranker");
    println!("Fetching top stories...");

    let mut session = ReaderSession::open(fetcher, ranker, config.story_limit).await?;
    match session.origin() {
        CollectionOrigin::Cache => println!(
            "Loaded {} stories from {}",
            session.stories().len(),
            session.cache().path().display()
        ),
        CollectionOrigin::Fetched => println!("Fetched {} stories", session.stories().len()),
    }
    println!(
        "Enter your interests to rerank, {REFRESH_COMMAND} to refresh the cache, :quit to exit."
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interests = String::new();

    loop {
        print!("interests> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        let ranked = if QUIT_COMMANDS.contains(&input) {
            break;
        } else if input == REFRESH_COMMAND {
            println!("Refreshing cache...");
            let ranked = session.refresh(&interests).await?;
            println!("Cache refreshed successfully!");
            ranked
        } else {
            interests = input.to_string();
            tokio::task::block_in_place(|| session.submit_interests(&interests))?
        };

        print!("{}", render_listing(&ranked));
    }

    tracing::info!("hn-rerank exiting");
    Ok(())
}
