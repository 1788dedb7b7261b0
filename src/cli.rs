//! Command-line interface for the roster viewer.
//!
//! Without a subcommand the interactive shell starts; the other subcommands
//! run a single query and exit.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::Command;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about = "Browse, search and summarize a student roster", long_about = None)]
pub struct Cli {
    /// Roster file (.txt/.json, .csv or .parquet); overrides the configured path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub data: Option<PathBuf>,

    /// Configuration file (defaults to ./roster.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// List every student
    List,

    /// Find students whose name contains NAME (case-insensitive)
    Search {
        #[arg(value_name = "NAME", default_value = "")]
        name: String,
    },

    /// Show students whose average is strictly above MIN
    Filter {
        #[arg(value_name = "MIN", default_value = "", allow_hyphen_values = true)]
        min: String,
    },

    /// Overall statistics
    Stats,
}

impl Commands {
    /// The shell command equivalent to a batch subcommand, `None` for `shell`.
    pub fn to_command(&self) -> Option<Command> {
        match self {
            Commands::Shell => None,
            Commands::List => Some(Command::List),
            Commands::Search { name } => Some(Command::Search(name.clone())),
            Commands::Filter { min } => Some(Command::Filter(min.clone())),
            Commands::Stats => Some(Command::Stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["roster"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.data.is_none());
    }

    #[test]
    fn batch_subcommands_map_to_shell_commands() {
        let cli =
            Cli::try_parse_from(["roster", "search", "EMILY", "--data", "class.json"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("class.json")));
        assert_eq!(
            cli.command.unwrap().to_command(),
            Some(Command::Search("EMILY".into()))
        );

        let cli = Cli::try_parse_from(["roster", "filter", "-5"]).unwrap();
        assert_eq!(cli.command.unwrap().to_command(), Some(Command::Filter("-5".into())));

        let cli = Cli::try_parse_from(["roster", "shell"]).unwrap();
        assert_eq!(cli.command.unwrap().to_command(), None);
    }

    #[test]
    fn empty_search_argument_reaches_validation() {
        let cli = Cli::try_parse_from(["roster", "search"]).unwrap();
        assert_eq!(cli.command.unwrap().to_command(), Some(Command::Search(String::new())));
    }
}
