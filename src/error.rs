//! Error types that the binary reacts to.
//!
//! Most fallible operations return `anyhow::Result`; the variants here are
//! the conditions callers need to recognise by kind.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PiSyncError {
    /// The skillz repository does not exist. Fatal for every command.
    #[error("skillz directory not found: {}", .0.display())]
    SourceRootNotFound(PathBuf),

    #[error("could not determine home directory (set PI_AGENT_DIR)")]
    HomeDirUnavailable,

    /// The dependency install step exited unsuccessfully.
    #[error("{command} failed in {} (exit {code})", .dir.display())]
    InstallFailed {
        command: String,
        dir: PathBuf,
        code: String,
    },
}
