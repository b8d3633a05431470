//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::source::DEFAULT_BASE_URL;
use crate::state::DEFAULT_COUNTRY;

/// A terminal news reader with offline bookmarks.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// newsapi.org API key.
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Root of the headlines API.
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Two-letter country code for breaking news.
    #[arg(long, env = "NEWS_COUNTRY", default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// SQLite file holding saved articles.
    #[arg(long, env = "NEWS_DATABASE", default_value = "news.db")]
    pub database: PathBuf,

    /// Directory for the rolling log file.
    #[arg(long, env = "NEWS_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_key_given() {
        let config = Config::try_parse_from(["headline-reader", "--api-key", "k"]).unwrap();

        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "https://newsapi.org/v2/");
        assert_eq!(config.country, "us");
        assert_eq!(config.database, PathBuf::from("news.db"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "headline-reader",
            "--api-key",
            "k",
            "--country",
            "gb",
            "--database",
            "/tmp/saved.db",
        ])
        .unwrap();

        assert_eq!(config.country, "gb");
        assert_eq!(config.database, PathBuf::from("/tmp/saved.db"));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
