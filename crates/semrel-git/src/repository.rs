//! Git repository wrapper.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use git2::Repository as Git2Repo;
use semrel_commit::{Actor, RawCommit};
use tracing::{debug, info};

use crate::{GitError, GitResult, TagAnnotation, TagRef};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Discovers the repository from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover() -> GitResult<Self> {
        let inner = Git2Repo::discover(".")?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns all tags in the repository.
    ///
    /// Each tag is peeled to its target commit; annotated tags additionally
    /// carry their tagger and tag date.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag references cannot be read.
    pub fn tags(&self) -> GitResult<Vec<TagRef>> {
        let mut tags = Vec::new();

        for reference in self.inner.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.name().and_then(|n| n.strip_prefix("refs/tags/")) else {
                continue;
            };
            let name = name.to_string();

            let target = match reference.peel_to_commit() {
                Ok(commit) => commit.id().to_string(),
                // A tag pointing at a tree or blob cannot mark a release.
                Err(_) => continue,
            };

            let annotation = reference.peel_to_tag().ok().and_then(|tag| {
                tag.tagger().map(|sig| TagAnnotation {
                    tagger: signature_actor(&sig),
                    tagged_date: signature_datetime(&sig),
                })
            });

            tags.push(TagRef {
                name,
                target,
                annotation,
            });
        }

        debug!(count = tags.len(), "enumerated repository tags");
        Ok(tags)
    }

    /// Returns the commits reachable from `HEAD` in reverse-chronological
    /// order.
    ///
    /// When `hide` names a revision (tag, branch or sha), that revision's
    /// ancestry is excluded from the walk.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision cannot be resolved or the walk
    /// fails.
    pub fn commits_since(&self, hide: Option<&str>) -> GitResult<Vec<RawCommit>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;

        if let Some(rev) = hide {
            let oid = self.resolve_commit(rev)?;
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;
            commits.push(raw_commit(&commit));
        }

        Ok(commits)
    }

    /// Looks up a single commit by hash.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RevisionNotFound`] if there is no such commit.
    pub fn find_commit(&self, hash: &str) -> GitResult<RawCommit> {
        let oid = self.resolve_commit(hash)?;
        let commit = self
            .inner
            .find_commit(oid)
            .map_err(|_| GitError::RevisionNotFound(hash.to_string()))?;
        Ok(raw_commit(&commit))
    }

    /// Returns all merge bases of two revisions.
    ///
    /// An empty vector means the revisions share no common ancestor.
    ///
    /// # Errors
    ///
    /// Returns an error if either revision cannot be resolved.
    pub fn merge_bases(&self, a: &str, b: &str) -> GitResult<Vec<String>> {
        let oid_a = self.resolve_commit(a)?;
        let oid_b = self.resolve_commit(b)?;

        match self.inner.merge_bases(oid_a, oid_b) {
            Ok(bases) => Ok(bases.iter().map(git2::Oid::to_string).collect()),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the name of the currently checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NoActiveBranch`] when HEAD is detached.
    pub fn active_branch_name(&self) -> GitResult<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(GitError::NoActiveBranch);
        }
        head.shorthand()
            .map(String::from)
            .ok_or(GitError::NoActiveBranch)
    }

    /// Returns the URL of the named remote.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RemoteNotFound`] if the remote is missing or has
    /// no URL.
    pub fn remote_url(&self, name: &str) -> GitResult<String> {
        let remote = self
            .inner
            .find_remote(name)
            .map_err(|_| GitError::RemoteNotFound(name.to_string()))?;
        remote
            .url()
            .map(String::from)
            .ok_or_else(|| GitError::RemoteNotFound(name.to_string()))
    }

    /// Stages every change in the working tree and commits it.
    ///
    /// Returns the new commit's hash.
    ///
    /// # Errors
    ///
    /// Returns an error if staging or committing fails.
    pub fn stage_all_and_commit(&self, message: &str) -> GitResult<String> {
        let mut index = self.inner.index()?;
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;
        let sig = self.inner.signature()?;

        let parent = self.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        info!(commit = %oid, "committed release changes");
        Ok(oid.to_string())
    }

    /// Creates an annotated tag at `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created (e.g. it already
    /// exists).
    pub fn create_tag(&self, name: &str, message: &str) -> GitResult<()> {
        let head = self.inner.head()?;
        let commit = head.peel_to_commit()?;
        let sig = self.inner.signature()?;

        self.inner
            .tag(name, commit.as_object(), &sig, message, false)?;
        info!(tag = name, "created tag");
        Ok(())
    }

    /// Pushes the given refspecs to the named remote, authenticating via
    /// the ssh agent or the configured credential helper.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote is missing or the push is rejected.
    pub fn push(&self, remote_name: &str, refspecs: &[String]) -> GitResult<()> {
        let mut remote = self
            .inner
            .find_remote(remote_name)
            .map_err(|_| GitError::RemoteNotFound(remote_name.to_string()))?;

        let config = self.inner.config()?;
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |url, username, allowed| {
            if allowed.contains(git2::CredentialType::SSH_KEY) {
                git2::Cred::ssh_key_from_agent(username.unwrap_or("git"))
            } else {
                git2::Cred::credential_helper(&config, url, username)
            }
        });

        let mut options = git2::PushOptions::new();
        options.remote_callbacks(callbacks);
        remote.push(refspecs, Some(&mut options))?;
        info!(remote = remote_name, ?refspecs, "pushed");
        Ok(())
    }

    /// The identity commits and tags are created with, from the
    /// repository configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when no signature is configured.
    pub fn signature(&self) -> GitResult<Actor> {
        let sig = self.inner.signature()?;
        Ok(signature_actor(&sig))
    }

    fn resolve_commit(&self, rev: &str) -> GitResult<git2::Oid> {
        let object = self
            .inner
            .revparse_single(rev)
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))?;
        Ok(commit.id())
    }
}

fn signature_actor(sig: &git2::Signature<'_>) -> Actor {
    Actor::new(sig.name().unwrap_or("Unknown"), sig.email().unwrap_or(""))
}

fn signature_datetime(sig: &git2::Signature<'_>) -> DateTime<FixedOffset> {
    git_time_to_datetime(sig.when())
}

fn git_time_to_datetime(time: git2::Time) -> DateTime<FixedOffset> {
    let utc = DateTime::from_timestamp(time.seconds(), 0).unwrap_or_default();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero is a valid offset"));
    utc.with_timezone(&offset)
}

fn raw_commit(commit: &git2::Commit<'_>) -> RawCommit {
    let author = commit.author();
    RawCommit::new(
        commit.id().to_string(),
        commit.message().unwrap_or(""),
        signature_actor(&author),
        git_time_to_datetime(author.when()),
        commit.parent_ids().map(|id| id.to_string()).collect(),
    )
}
