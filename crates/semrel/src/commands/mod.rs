//! CLI commands.

use std::path::PathBuf;

pub mod changelog;
pub mod print_version;
pub mod publish;
pub mod version;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit configuration file path.
    pub config: Option<PathBuf>,

    /// Compute everything but write nothing.
    pub noop: bool,
}
