//! Release core for semrel.
//!
//! This crate ties the repository, the commit parser and the version
//! model together:
//! - [`next_version`]: decides whether a release is warranted and computes
//!   the next version from the branch's history
//! - [`release_history`]: groups every commit into per-release changelog
//!   buckets
//! - [`ChangelogContext`]: binds the history and the hosting-service URL
//!   helpers into a template environment

mod algorithm;
mod context;
mod error;
mod history;

pub use algorithm::{next_version, tags_and_versions};
pub use context::{ChangelogContext, DEFAULT_TEMPLATE};
pub use error::{CoreError, CoreResult};
pub use history::{Release, ReleaseHistory, release_history};
