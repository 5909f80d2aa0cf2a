//! pi-sync - Skillz repository synchronization
//!
//! Links or copies extensions, skills, agent definitions, prompts, themes
//! and config files from a skillz repository into a pi agent directory.
//! Nothing is recorded besides the synced files themselves: status is
//! always re-derived from the agent directory.

pub mod category;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod installer;
pub mod linker;
pub mod output;
pub mod report;
pub mod resolver;

pub use category::Category;
pub use config::Paths;
pub use error::PiSyncError;
pub use linker::{ApplyOutcome, Linker, SyncOptions, SyncResult};
pub use resolver::{ResolvedSource, SourceKind, resolve};
