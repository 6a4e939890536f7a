//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Automated semantic versioning and changelog generation for Git-based
/// projects.
#[derive(Debug, Parser)]
#[command(name = "semrel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: semrel.toml at the
    /// repository root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Compute everything but write nothing
    #[arg(long, global = true)]
    pub noop: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the next version and exit
    PrintVersion(commands::print_version::PrintVersionArgs),

    /// Compute the next version, update version files, commit and tag
    Version(commands::version::VersionArgs),

    /// Render the changelog
    Changelog(commands::changelog::ChangelogArgs),

    /// Run a full release: version, changelog, push, create the remote
    /// release
    Publish(commands::publish::PublishArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let opts = commands::GlobalOptions {
            config: self.config,
            noop: self.noop,
        };
        match self.command {
            Commands::PrintVersion(args) => commands::print_version::run(&opts, &args),
            Commands::Version(args) => commands::version::run(&opts, &args),
            Commands::Changelog(args) => commands::changelog::run(&opts, &args),
            Commands::Publish(args) => commands::publish::run(&opts, &args),
        }
    }
}
