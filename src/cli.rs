use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::infra::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "chatroom", about = "Terminal client for a serverless chat room")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the function gateway
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Default number of posts to list
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_posts: Option<u64>,

    /// Force debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the interactive menu
    Run,
    /// Print the latest posts and exit
    Posts {
        /// Number of posts to fetch (default: posts.max_posts)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            max_posts: self.max_posts,
            debug: self.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn defaults_to_run_when_command_is_missing() {
        let cli = Cli::parse_from(["chatroom"]);

        assert_eq!(cli.command_or_default(), Command::Run);
        assert!(!cli.overrides().debug);
    }

    #[test]
    fn parses_explicit_run_command() {
        let cli = Cli::parse_from(["chatroom", "run", "--config", "custom.toml"]);

        assert_eq!(cli.command_or_default(), Command::Run);
        assert_eq!(
            cli.config
                .as_deref()
                .map(|p| p.to_string_lossy().to_string()),
            Some("custom.toml".to_owned())
        );
    }

    #[test]
    fn parses_posts_command_with_global_overrides() {
        let cli = Cli::parse_from([
            "chatroom",
            "posts",
            "--count",
            "5",
            "--endpoint",
            "https://chat.example.com",
            "--max-posts",
            "20",
            "--debug",
        ]);

        assert_eq!(cli.command_or_default(), Command::Posts { count: Some(5) });
        let overrides = cli.overrides();
        assert_eq!(overrides.endpoint.as_deref(), Some("https://chat.example.com"));
        assert_eq!(overrides.max_posts, Some(20));
        assert!(overrides.debug);
    }

    #[test]
    fn rejects_zero_counts() {
        assert!(Cli::try_parse_from(["chatroom", "--max-posts", "0"]).is_err());
        assert!(Cli::try_parse_from(["chatroom", "posts", "--count", "0"]).is_err());
    }
}
