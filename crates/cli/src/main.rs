//! bkt - interactive bucket session
//!
//! Lists, uploads, filters and pattern-deletes objects in one
//! S3-compatible bucket from a menu loop.

use bkt_cli::commands::{self, Cli};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events `--debug` turns on
const DEBUG_DIRECTIVES: &str = "bkt=debug,bkt_cli=debug,bkt_core=debug,bkt_s3=debug";

/// Filter used when RUST_LOG is unset
fn default_directives(debug: bool) -> &'static str {
    if debug { DEBUG_DIRECTIVES } else { "warn" }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --debug. Logs go to stderr so they never mix with
    // listed keys or JSON reports on stdout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(cli.debug)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;
    tracing::debug!(exit_code = %exit_code, "exiting");

    std::process::exit(exit_code.as_i32());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "warn");
        assert!(default_directives(true).contains("bkt_core=debug"));
    }
}
