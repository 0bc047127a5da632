//! Command line surface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "irank",
    version,
    about = "IntelliRank terminal client: semantic search against a ranking service",
    propagate_version = true
)]
pub struct Cli {
    /// Path to a config file (defaults to the global config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Machine-readable JSON output on stdout
    #[arg(
        long,
        global = true,
        env = "IRANK_ROBOT",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand; the terminal client opens when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// True when this invocation opens the full-screen client.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Browse(_)))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["irank"]).unwrap();
        assert!(cli.is_interactive());
        assert!(!cli.robot);
    }

    #[test]
    fn test_search_parses_filters() {
        let cli = Cli::try_parse_from([
            "irank",
            "--robot",
            "search",
            "noise cancelling",
            "--category",
            "Products",
        ])
        .unwrap();
        assert!(!cli.is_interactive());
        assert!(cli.robot);
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "noise cancelling");
                assert_eq!(args.category, "Products");
                assert_eq!(args.subcategory, "All");
            }
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn test_health_watch_rejects_zero() {
        assert!(Cli::try_parse_from(["irank", "health", "--watch", "0"]).is_err());
    }
}
