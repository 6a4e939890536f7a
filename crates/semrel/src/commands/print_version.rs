//! Print-version command.

use anyhow::Result;
use clap::Args;

use crate::commands::GlobalOptions;
use crate::context::RuntimeContext;

/// Arguments for the print-version command.
#[derive(Debug, Args)]
pub struct PrintVersionArgs {}

/// Computes the next version and prints it, without touching anything.
pub fn run(opts: &GlobalOptions, _args: &PrintVersionArgs) -> Result<()> {
    let Some(ctx) = RuntimeContext::load(opts)? else {
        return Ok(());
    };

    let next = ctx.next_version()?;
    println!("{next}");
    Ok(())
}
