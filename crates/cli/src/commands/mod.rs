//! CLI definition and dispatch
//!
//! Without a subcommand `bkt` runs the interactive bucket session.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;

mod completions;
mod session;

/// bkt - interactive bucket session
///
/// List, upload, filter and pattern-delete objects in a single
/// S3-compatible bucket from a menu.
#[derive(Parser, Debug)]
#[command(name = "bkt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Bucket to operate on
    #[arg(long, global = true, env = "S3_BUCKET")]
    pub bucket: Option<String>,

    /// Custom endpoint URL for S3-compatible services
    #[arg(long, global = true, env = "AWS_ENDPOINT_URL")]
    pub endpoint: Option<String>,

    /// Region of the bucket
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Use path-style addressing (endpoint/bucket/key)
    #[arg(long, global = true, default_value = "false")]
    pub path_style: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "BKT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print reports as JSON lines
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable the progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    match &cli.command {
        Some(Commands::Completions(args)) => completions::execute(args),
        None => session::execute(&cli).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_session_flags() {
        let cli = Cli::try_parse_from([
            "bkt",
            "--bucket",
            "photos",
            "--endpoint",
            "http://localhost:9000",
            "--path-style",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.bucket.as_deref(), Some("photos"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(cli.path_style);
        assert!(cli.json);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["bkt", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Completions(_))));
    }
}
