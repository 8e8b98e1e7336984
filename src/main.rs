//! Lunch Bot - answers "what's for lunch" in chat
//!
//! Fetches the daily cafeteria menu from a remote extraction service,
//! caches it until the next calendar day, and replies with formatted text.
//! This binary fronts the bot with a line-oriented console REPL standing in
//! for a chat-protocol connection.

mod bot;
mod cache;
mod cli;
mod data;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::{LunchBot, ReplySink};
use cache::MenuCache;
use cli::Config;
use data::MenuClient;

/// Channel identifier for console replies
const CONSOLE_CHANNEL: &str = "console";

/// Reply sink that prints messages to stdout
struct ConsoleSink;

#[async_trait]
impl ReplySink for ConsoleSink {
    async fn send(&self, _channel: &str, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::parse();

    info!("lunch bot commencing operations");

    let cache = Arc::new(MenuCache::new());
    let client = MenuClient::new(config.extractor_url.clone())
        .with_timeout(Duration::from_secs(config.timeout_secs));
    let bot = LunchBot::new(cache, Arc::new(client), config.weekend_aware);

    // Refresh up front so the first query doesn't block on a fetch.
    bot.startup_refresh().await;

    run_repl(&bot).await
}

/// Reads trigger lines from stdin and replies on stdout until EOF
async fn run_repl(bot: &LunchBot) -> Result<()> {
    let sink = ConsoleSink;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        bot.handle(&line, CONSOLE_CHANNEL, &sink).await?;
    }

    Ok(())
}
