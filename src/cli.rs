//! Configuration for the lunch bot
//!
//! This module handles parsing of configuration from CLI flags and the
//! environment using clap, including the extraction endpoint URL and the
//! weekend-aware rendering variant.

use clap::Parser;

/// Lunch Bot - answers "what's for lunch" in chat
#[derive(Parser, Debug)]
#[command(name = "lunchbot")]
#[command(about = "Cafeteria menu chat bot")]
#[command(version)]
pub struct Config {
    /// Menu extraction service endpoint URL
    #[arg(long, env = "EXTRACTOR_URL", value_name = "URL")]
    pub extractor_url: String,

    /// Reply with a weekend notice on Saturdays and Sundays instead of
    /// the cached menu
    #[arg(long, env = "LUNCHBOT_WEEKEND_AWARE")]
    pub weekend_aware: bool,

    /// Bound on a single fetch request, in seconds
    #[arg(long, env = "LUNCHBOT_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_extractor_url() {
        let result = Config::try_parse_from(["lunchbot"]);
        assert!(result.is_err(), "extractor URL should be required");
    }

    #[test]
    fn test_parse_extractor_url_flag() {
        let config =
            Config::try_parse_from(["lunchbot", "--extractor-url", "http://example.com/extract"])
                .unwrap();

        assert_eq!(config.extractor_url, "http://example.com/extract");
        assert!(!config.weekend_aware);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_parse_weekend_aware_flag() {
        let config = Config::try_parse_from([
            "lunchbot",
            "--extractor-url",
            "http://example.com/extract",
            "--weekend-aware",
        ])
        .unwrap();

        assert!(config.weekend_aware);
    }

    #[test]
    fn test_parse_timeout_override() {
        let config = Config::try_parse_from([
            "lunchbot",
            "--extractor-url",
            "http://example.com/extract",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(config.timeout_secs, 3);
    }
}
