//! Changelog command.

use std::fs;

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::commands::GlobalOptions;
use crate::context::RuntimeContext;

/// Arguments for the changelog command.
#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Output file (default: from configuration)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print to stdout instead of writing a file
    #[arg(short, long)]
    pub print: bool,
}

/// Renders the changelog for the repository's current state.
pub fn run(opts: &GlobalOptions, args: &ChangelogArgs) -> Result<()> {
    let Some(ctx) = RuntimeContext::load(opts)? else {
        return Ok(());
    };

    let history = ctx.release_history()?;
    let rendered = ctx.render_changelog(history)?;

    if args.print {
        print!("{rendered}");
        return Ok(());
    }

    let output = args.output.as_ref().unwrap_or(&ctx.changelog_output);
    if ctx.noop {
        info!(path = %output, "noop mode, not writing changelog");
        return Ok(());
    }

    fs::write(ctx.repo.path().join(output), rendered)?;
    info!(path = %output, "wrote changelog");
    Ok(())
}
