//! Version command.

use std::fs;

use anyhow::Result;
use clap::Args;
use semrel_version::Version;
use tracing::info;

use crate::commands::GlobalOptions;
use crate::context::RuntimeContext;

/// Arguments for the version command.
#[derive(Debug, Args)]
pub struct VersionArgs {}

/// Computes the next version; if a release is due, rewrites version files
/// and the changelog, commits and tags.
pub fn run(opts: &GlobalOptions, _args: &VersionArgs) -> Result<()> {
    let Some(ctx) = RuntimeContext::load(opts)? else {
        return Ok(());
    };
    let Some(next) = compute_release(&ctx)? else {
        return Ok(());
    };

    apply_release(&ctx, &next)?;
    println!("{next}");
    Ok(())
}

/// Computes the next version, returning `None` when no release is due.
pub(crate) fn compute_release(ctx: &RuntimeContext) -> Result<Option<Version>> {
    let next = ctx.next_version()?;

    // The algorithm returns the current version unchanged when nothing in
    // the history warrants a release; 0.0.0 is the pre-first-release
    // baseline and is never released itself.
    if next == Version::new(0, 0, 0) || ctx.is_released(&next)? {
        info!(version = %next, "no release will be made");
        return Ok(None);
    }

    Ok(Some(next))
}

/// The ordered write phase: version files and changelog, then commit, then
/// tag. A failing step skips everything after it.
pub(crate) fn apply_release(ctx: &RuntimeContext, version: &Version) -> Result<()> {
    if ctx.noop {
        info!(%version, "noop mode, skipping all writes");
        return Ok(());
    }

    for declaration in &ctx.declarations {
        declaration.replace(version)?;
        info!(path = %declaration.path().display(), "updated version declaration");
    }

    let tagger = ctx.repo.signature()?;
    let history = ctx.release_history()?.with_pending_release(
        version.clone(),
        tagger,
        chrono::Local::now().fixed_offset(),
    );
    let changelog = ctx.render_changelog(history)?;
    fs::write(ctx.repo.path().join(&ctx.changelog_output), changelog)?;
    info!(path = %ctx.changelog_output, "wrote changelog");

    let message = ctx.commit_message.replace("{version}", &version.to_string());
    ctx.repo.stage_all_and_commit(&message)?;

    let tag = ctx.translator.str_to_tag(version);
    ctx.repo.create_tag(&tag, &version.to_string())?;

    Ok(())
}
