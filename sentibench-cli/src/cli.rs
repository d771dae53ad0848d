//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single text against the sentiment service
    Analyze {
        /// Text to analyze
        #[arg(long, value_name = "STRING")]
        text: String,

        /// Print the raw JSON result instead of the formatted line
        #[arg(long)]
        json: bool,
    },

    /// Interactive analyze console with session history
    Console,

    /// Run the load profile against the target service
    Run {
        /// Override the target base URL
        #[arg(long, value_name = "URL")]
        target: Option<String>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration in use
    Show {
        /// Output format: yaml, json
        #[arg(long, value_name = "FORMAT", default_value = "yaml")]
        format: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["sentibench", "analyze", "--text", "great product"]);
        match cli.command {
            Commands::Analyze { text, json } => {
                assert_eq!(text, "great product");
                assert!(!json);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_parse_run_with_target_override() {
        let cli = Cli::parse_from(["sentibench", "run", "--target", "http://localhost:8000"]);
        match cli.command {
            Commands::Run { target } => {
                assert_eq!(target.as_deref(), Some("http://localhost:8000"));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_global_flags_allowed_after_subcommand() {
        let cli = Cli::parse_from(["sentibench", "run", "--log-level", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
