//! Publish command.

use anyhow::Result;
use clap::Args;
use semrel_hvcs::HvcsError;
use tracing::{info, warn};

use crate::commands::GlobalOptions;
use crate::commands::version::{apply_release, compute_release};
use crate::context::RuntimeContext;

/// Arguments for the publish command.
#[derive(Debug, Args)]
pub struct PublishArgs {}

/// Runs a full release: the version write phase, then push, then the
/// remote release.
pub fn run(opts: &GlobalOptions, _args: &PublishArgs) -> Result<()> {
    let Some(ctx) = RuntimeContext::load(opts)? else {
        return Ok(());
    };
    let Some(next) = compute_release(&ctx)? else {
        return Ok(());
    };

    apply_release(&ctx, &next)?;

    if ctx.noop {
        println!("{next}");
        return Ok(());
    }

    let branch = ctx.repo.active_branch_name()?;
    let tag = ctx.translator.str_to_tag(&next);
    ctx.repo.push(
        &ctx.remote_name,
        &[
            format!("refs/heads/{branch}:refs/heads/{branch}"),
            format!("refs/tags/{tag}:refs/tags/{tag}"),
        ],
    )?;

    // Release publication is best-effort: a service without support
    // answers with a signal, not a failure.
    let notes = ctx.render_changelog(ctx.release_history()?)?;
    match ctx.hvcs.create_release(&tag, &notes, next.is_prerelease()) {
        Ok(()) => info!(%tag, "created remote release"),
        Err(HvcsError::NotSupported { service, operation }) => {
            warn!(service, operation, "skipping remote release");
        }
        Err(err) => warn!(error = %err, "failed to create remote release"),
    }

    println!("{next}");
    Ok(())
}
