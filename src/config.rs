//! Source and destination layout for pi-sync
//!
//! Resolves the skillz repository and the pi agent directory, and maps
//! each category to its directory on both sides.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::category::Category;
use crate::error::PiSyncError;

/// Subdirectory of the skillz repository holding pi-specific content
pub const PI_SOURCE_DIR: &str = "pi";

/// Default agent directory, relative to the home directory
pub const DEFAULT_AGENT_DIR: &str = ".pi/agent";

/// The two roots every operation works between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Skillz repository (read-only)
    pub skillz_dir: PathBuf,
    /// pi agent directory receiving synced items
    pub agent_dir: PathBuf,
}

impl Paths {
    pub fn new(skillz_dir: impl Into<PathBuf>, agent_dir: impl Into<PathBuf>) -> Self {
        Self {
            skillz_dir: skillz_dir.into(),
            agent_dir: agent_dir.into(),
        }
    }

    /// Build paths from explicit values, falling back to the current
    /// directory and `~/.pi/agent`.
    ///
    /// The skillz directory is made absolute so symlinks created from it
    /// never carry relative targets.
    pub fn resolve(skillz_dir: Option<PathBuf>, agent_dir: Option<PathBuf>) -> Result<Self> {
        let skillz_dir = match skillz_dir {
            Some(dir) => std::path::absolute(&dir)
                .with_context(|| format!("Failed to resolve path: {}", dir.display()))?,
            None => env::current_dir().context("Failed to read current directory")?,
        };

        let agent_dir = match agent_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or(PiSyncError::HomeDirUnavailable)?
                .join(DEFAULT_AGENT_DIR),
        };

        Ok(Self::new(skillz_dir, agent_dir))
    }

    /// Fail unless the skillz directory exists.
    pub fn ensure_source_root(&self) -> Result<(), PiSyncError> {
        if self.skillz_dir.is_dir() {
            Ok(())
        } else {
            Err(PiSyncError::SourceRootNotFound(self.skillz_dir.clone()))
        }
    }

    /// Directory a category is read from.
    pub fn source_dir(&self, category: Category) -> PathBuf {
        match category {
            Category::Skill => self.skillz_dir.join(category.plural()),
            Category::Config => self.skillz_dir.join(PI_SOURCE_DIR),
            _ => self.skillz_dir.join(PI_SOURCE_DIR).join(category.plural()),
        }
    }

    /// Directory a category is written to.
    pub fn dest_dir(&self, category: Category) -> PathBuf {
        match category {
            Category::Config => self.agent_dir.clone(),
            _ => self.agent_dir.join(category.plural()),
        }
    }
}
