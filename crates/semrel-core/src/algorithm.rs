//! Next-version computation.

use std::collections::{HashSet, VecDeque};

use semrel_commit::LevelBump;
use semrel_git::{Repository, TagRef};
use semrel_parser::CommitParser;
use semrel_version::{Version, VersionTranslator};
use tracing::{debug, info};

use crate::{CoreError, CoreResult};

/// Pairs every version tag with its parsed version, sorted descending by
/// semver precedence. Tags that do not follow the configured format are
/// silently dropped.
#[must_use]
pub fn tags_and_versions(
    tags: &[TagRef],
    translator: &VersionTranslator,
) -> Vec<(TagRef, Version)> {
    let mut pairs: Vec<(TagRef, Version)> = tags
        .iter()
        .filter_map(|tag| {
            translator
                .from_tag(&tag.name)
                .map(|version| (tag.clone(), version))
        })
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Breadth-first search through the merge base's ancestry for the most
/// recent commit carrying a full-release tag.
///
/// Long histories rule out recursion; the walk keeps an explicit queue and
/// a visited set so merge topologies terminate.
fn bfs_latest_version_in_history(
    repo: &Repository,
    merge_base: &str,
    full_release_tags: &[(TagRef, Version)],
) -> CoreResult<Option<Version>> {
    let mut queue: VecDeque<String> = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();
    queue.push_back(merge_base.to_string());

    while let Some(hash) = queue.pop_front() {
        if !visited.insert(hash.clone()) {
            continue;
        }

        // full_release_tags is sorted descending, so the first match is
        // the highest version pointing at this commit.
        if let Some((tag, version)) = full_release_tags
            .iter()
            .find(|(tag, _)| tag.points_at(&hash))
        {
            info!(version = %version, tag = %tag.name, "found latest full release in branch history");
            return Ok(Some(version.clone()));
        }
        debug!(commit = &hash[..7.min(hash.len())], "commit doesn't match any full-release tag");

        let commit = repo.find_commit(&hash)?;
        queue.extend(commit.parents);
    }

    Ok(None)
}

/// Applies `level_bump` to the branch's release state.
///
/// `latest_version` is the most recent version released from this branch's
/// history, `latest_full_version` the most recent full release anywhere in
/// the repository, and `latest_full_version_in_history` the most recent
/// full release reachable from this branch.
fn increment_version(
    latest_version: &Version,
    latest_full_version: &Version,
    latest_full_version_in_history: &Version,
    mut level_bump: LevelBump,
    prerelease: bool,
    prerelease_token: &str,
    major_on_zero: bool,
) -> Version {
    if !major_on_zero && latest_version.major == 0 {
        debug!("0.x version with major_on_zero disabled, clamping bump to minor");
        level_bump = level_bump.min(LevelBump::Minor);
    }

    if prerelease {
        let diff = latest_version.diff(latest_full_version_in_history);
        debug!(%diff, "prerelease progress relative to the last full release");
        if level_bump > diff {
            // e.g. 1.2.4-rc.3 + feat -> 1.3.0-rc.1
            return latest_full_version
                .finalize_version()
                .bump(level_bump)
                .to_prerelease(prerelease_token, None);
        }
        // Same core triple; advance the revision, restarting when the
        // configured token changed mid-cycle.
        let revision = if latest_version.prerelease_token.as_deref() != Some(prerelease_token) {
            1
        } else {
            latest_version.prerelease_revision.unwrap_or(0) + 1
        };
        return latest_version.to_prerelease(prerelease_token, Some(revision));
    }

    if latest_version.is_prerelease() {
        let diff = latest_version.diff(latest_full_version_in_history);
        debug!(%diff, "finalizing after a prerelease cycle");
        if level_bump > diff {
            return latest_version.bump(level_bump).finalize_version();
        }
        return latest_version.finalize_version();
    }

    latest_version.bump(level_bump)
}

/// Computes the next version for the repository's active branch.
///
/// The commits since the last full release reachable from the branch are
/// parsed and the strongest level wins; `prerelease` selects between
/// minting prerelease revisions and full releases, and `major_on_zero`
/// controls whether breaking changes may leave the 0.x range.
///
/// When no commit warrants a release the current version is returned
/// unchanged.
///
/// # Errors
///
/// Returns an error when the repository cannot be read or its topology is
/// ambiguous ([`CoreError::MultipleMergeBases`] /
/// [`CoreError::MergeBaseNotFound`]).
pub fn next_version(
    repo: &Repository,
    translator: &VersionTranslator,
    parser: &dyn CommitParser,
    prerelease: bool,
    major_on_zero: bool,
) -> CoreResult<Version> {
    // Step 1: all tags, sorted descending by semver precedence.
    let all_tags = tags_and_versions(&repo.tags()?, translator);
    let full_release_tags: Vec<(TagRef, Version)> = all_tags
        .iter()
        .filter(|(_, version)| !version.is_prerelease())
        .cloned()
        .collect();
    debug!(count = all_tags.len(), "found previous tags");

    let active_branch = repo.active_branch_name()?;

    // Step 2: the highest full release anywhere in the repository.
    let latest_full_release = full_release_tags.first().cloned();

    // Step 3: merge base of that release and the active branch. With no
    // releases yet the branch's own tip serves as the merge base.
    let (merge_base_name, merge_bases) = match &latest_full_release {
        Some((tag, version)) => {
            info!(%version, tag = %tag.name, "last full release");
            (tag.name.clone(), repo.merge_bases(&tag.name, &active_branch)?)
        }
        None => {
            info!("no full releases have been made yet");
            (
                active_branch.clone(),
                repo.merge_bases(&active_branch, &active_branch)?,
            )
        }
    };
    if merge_bases.len() > 1 {
        return Err(CoreError::MultipleMergeBases {
            tag: merge_base_name,
            branch: active_branch,
            count: merge_bases.len(),
        });
    }
    let Some(merge_base) = merge_bases.first() else {
        return Err(CoreError::MergeBaseNotFound {
            tag: merge_base_name,
            branch: active_branch,
        });
    };

    // Step 4: the most recent full release actually reachable from here.
    let latest_full_version_in_history =
        bfs_latest_version_in_history(repo, merge_base, &full_release_tags)?;

    // Step 5: walk the commits on top of it, collecting bump levels until
    // a qualifying tag is reached. Prerelease runs may stop at prerelease
    // tags; full-release runs must look back to the last full release.
    let commits = match &latest_full_version_in_history {
        Some(version) => repo.commits_since(Some(&translator.str_to_tag(version)))?,
        None => repo.commits_since(None)?,
    };

    let mut parsed_levels: HashSet<LevelBump> = HashSet::new();
    let mut latest_version = latest_full_version_in_history
        .clone()
        .unwrap_or_else(|| Version::new(0, 0, 0));

    'commits: for commit in &commits {
        if let Some(parsed) = parser.parse(commit).as_parsed() {
            debug!(commit = commit.short_hash(), bump = %parsed.bump, "parsed commit");
            parsed_levels.insert(parsed.bump);
        }

        for (tag, version) in all_tags
            .iter()
            .filter(|(_, version)| prerelease || !version.is_prerelease())
        {
            if tag.points_at(&commit.hash) {
                latest_version = version.clone();
                debug!(tag = %tag.name, commit = commit.short_hash(), %latest_version, "tag matches commit, stopping walk");
                break 'commits;
            }
        }
    }

    // Step 6: the strongest level wins; nothing qualifying means no
    // release.
    let level_bump = parsed_levels.iter().copied().max().unwrap_or_default();
    info!(%level_bump, "release type triggered by the commits");
    if level_bump == LevelBump::NoRelease {
        info!("no release will be made");
        return Ok(latest_version);
    }

    let latest_full_version = latest_full_release
        .map(|(_, version)| version)
        .unwrap_or_else(|| Version::new(0, 0, 0));

    Ok(increment_version(
        &latest_version,
        &latest_full_version,
        &latest_full_version_in_history.unwrap_or_else(|| Version::new(0, 0, 0)),
        level_bump,
        prerelease,
        translator.prerelease_token(),
        major_on_zero,
    ))
}
