//! semrel CLI - automated semantic versioning from conventional commits.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;
mod masking;

fn main() -> Result<()> {
    // Initialize logging; secrets registered later are redacted by the
    // masking writer on every write.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(masking::MaskingStderr)
        .init();

    // Parse CLI arguments and run
    let cli = cli::Cli::parse();
    cli.run()
}
