//! Chat command handling
//!
//! Maps incoming trigger strings to bot commands and produces the reply
//! messages. The chat protocol itself lives behind the [`ReplySink`] trait,
//! so this module only decides what to say, never how it is delivered.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use tracing::{error, info, warn};

use crate::cache::{MenuCache, RefreshOutcome};
use crate::data::MenuSource;
use crate::render;

/// Notice sent before a refresh that will block the reply
const FETCH_NOTICE: &str = "Let me fetch the latest menu...";

/// Reply to the `help` command
const HELP_TEXT: &str = "Lunch Bot - Lunch is my life.\n\n\
    menu - Tells you what's on the cafeteria menu today.\n\
    What's for lunch? - Same thing.\n\
    status - Tells you the last time the menu was updated.\n\
    legend - Tells you the meaning of the various item attributes (FF, VG, etc.)";

/// Bot commands users can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show today's menu, refreshing it first if stale
    Menu,
    /// Show when the menu was last refreshed and the usage count
    Status,
    /// Show the attribute code legend
    Legend,
    /// Show the command list
    Help,
}

impl Command {
    /// Parses a trigger string into a Command.
    ///
    /// Matching is case-insensitive and supports the natural-language
    /// aliases for the menu query ("what's for lunch", with or without
    /// the question mark or apostrophe).
    ///
    /// Returns `None` if the input doesn't match any command.
    pub fn parse(input: &str) -> Option<Command> {
        match input.trim().to_lowercase().as_str() {
            "menu" | "lunch" | "what's for lunch" | "what's for lunch?" | "whats for lunch"
            | "whats for lunch?" => Some(Command::Menu),
            "status" => Some(Command::Status),
            "legend" => Some(Command::Legend),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}

/// Destination for outgoing chat messages
///
/// Implemented by whatever fronts the bot: the console REPL here, or a real
/// chat-protocol adapter.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Sends one text message to the given channel
    async fn send(&self, channel: &str, text: &str) -> Result<()>;
}

/// The lunch bot command handler
///
/// Owns the cache and the menu source; process-scoped, created once at
/// startup and driven by whichever front-end receives triggers.
pub struct LunchBot {
    cache: Arc<MenuCache>,
    source: Arc<dyn MenuSource>,
    weekend_aware: bool,
}

impl LunchBot {
    /// Creates a new bot over the given cache and menu source
    pub fn new(cache: Arc<MenuCache>, source: Arc<dyn MenuSource>, weekend_aware: bool) -> Self {
        Self {
            cache,
            source,
            weekend_aware,
        }
    }

    /// Runs the startup refresh so the first query doesn't block on a fetch
    ///
    /// Failures are logged and swallowed; the bot keeps serving and the
    /// first menu reply degrades to the fallback text.
    pub async fn startup_refresh(&self) {
        self.log_refresh(self.cache.refresh(Local::now(), self.source.as_ref()).await);
    }

    /// Handles one trigger string
    ///
    /// Returns `Ok(true)` if the input matched a command (and exactly one
    /// reply was sent, or two when a refresh notice preceded the menu), and
    /// `Ok(false)` for unrecognized input, which produces no reply.
    pub async fn handle(&self, trigger: &str, channel: &str, sink: &dyn ReplySink) -> Result<bool> {
        let command = match Command::parse(trigger) {
            Some(command) => command,
            None => return Ok(false),
        };

        match command {
            Command::Menu => self.handle_menu(channel, sink).await?,
            Command::Status => {
                let snapshot = self.cache.snapshot().await;
                let reply = render::render_status(snapshot.last_fetched_at, snapshot.usage_count);
                sink.send(channel, &reply).await?;
            }
            Command::Legend => sink.send(channel, &render::render_legend()).await?,
            Command::Help => sink.send(channel, HELP_TEXT).await?,
        }

        Ok(true)
    }

    /// Handles the menu query: count it, refresh if stale, render the cache
    async fn handle_menu(&self, channel: &str, sink: &dyn ReplySink) -> Result<()> {
        self.cache.record_query();

        let now = Local::now();
        if self.cache.needs_refresh(now).await {
            sink.send(channel, FETCH_NOTICE).await?;
            self.log_refresh(self.cache.refresh(now, self.source.as_ref()).await);
        }

        let snapshot = self.cache.snapshot().await;
        let reply =
            render::render_menu(&snapshot.menu, snapshot.last_fetched_at, self.weekend_aware);
        sink.send(channel, &reply).await
    }

    /// Logs a refresh outcome; errors stop here, never in a chat reply
    fn log_refresh(&self, outcome: RefreshOutcome) {
        match outcome {
            RefreshOutcome::Refreshed { items } => info!(items, "refreshed menu"),
            RefreshOutcome::QuotaExceeded => {
                warn!("menu extractor quota exceeded for the month")
            }
            RefreshOutcome::AlreadyFresh => {}
            RefreshOutcome::Failed(err) => error!(error = %err, "menu refresh failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_aliases() {
        assert_eq!(Command::parse("menu"), Some(Command::Menu));
        assert_eq!(Command::parse("lunch"), Some(Command::Menu));
        assert_eq!(Command::parse("what's for lunch?"), Some(Command::Menu));
        assert_eq!(Command::parse("What's for lunch"), Some(Command::Menu));
        assert_eq!(Command::parse("whats for lunch"), Some(Command::Menu));
        assert_eq!(Command::parse("WHATS FOR LUNCH?"), Some(Command::Menu));
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(Command::parse("status"), Some(Command::Status));
        assert_eq!(Command::parse("legend"), Some(Command::Legend));
        assert_eq!(Command::parse("help"), Some(Command::Help));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Command::parse("  menu  "), Some(Command::Menu));
        assert_eq!(Command::parse("\tstatus\n"), Some(Command::Status));
    }

    #[test]
    fn test_parse_unrecognized_input() {
        assert_eq!(Command::parse("dinner"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("menus"), None);
    }

    #[test]
    fn test_help_text_lists_all_commands() {
        assert!(HELP_TEXT.contains("menu"));
        assert!(HELP_TEXT.contains("status"));
        assert!(HELP_TEXT.contains("legend"));
        assert!(HELP_TEXT.contains("What's for lunch?"));
    }
}
