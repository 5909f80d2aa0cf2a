//! Name resolution
//!
//! Maps a bare item name to the artifact it refers to in the skillz
//! repository. The result carries an explicit classification so the sync
//! engine never has to re-inspect the source to decide how to apply it.

use anyhow::{Result, bail};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::category::{
    CONFIG_FILES, Category, DEPENDENCY_MANIFEST, ENTRY_POINT, SKILL_MARKER, is_eligible_script,
};
use crate::config::Paths;

/// How a resolved source is synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A single file.
    File,
    /// A multi-file extension synced as a unit; may need a dependency install.
    DirectoryExtension,
    /// A plain directory (skills), copied recursively.
    Directory,
}

/// A source artifact found for a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl ResolvedSource {
    fn new(path: PathBuf, kind: SourceKind) -> Self {
        Self { path, kind }
    }

    pub fn is_dir(&self) -> bool {
        self.kind != SourceKind::File
    }
}

/// Resolve `name` within `category`. `None` means not found.
pub fn resolve(paths: &Paths, category: Category, name: &str) -> Option<ResolvedSource> {
    if let Err(e) = validate_name(category, name) {
        tracing::debug!(%category, name, error = %e, "Rejected item name");
        return None;
    }

    let resolved = match category {
        Category::Extension => resolve_extension(&paths.source_dir(category), name),
        Category::Skill => {
            let candidate = paths.source_dir(category).join(name);
            candidate
                .is_dir()
                .then(|| ResolvedSource::new(candidate, SourceKind::Directory))
        }
        Category::Config => {
            let candidate = paths.source_dir(category).join(name);
            (CONFIG_FILES.contains(&name) && candidate.is_file())
                .then(|| ResolvedSource::new(candidate, SourceKind::File))
        }
        Category::Agent | Category::Prompt | Category::Theme => {
            let ext = category.file_extension().unwrap_or_default();
            let candidate = paths.source_dir(category).join(format!("{name}.{ext}"));
            candidate
                .is_file()
                .then(|| ResolvedSource::new(candidate, SourceKind::File))
        }
    };

    tracing::debug!(%category, name, ?resolved, "Resolved item");
    resolved
}

fn resolve_extension(ext_dir: &Path, name: &str) -> Option<ResolvedSource> {
    let candidate = ext_dir.join(name);
    if candidate.is_dir() {
        let scripts = eligible_scripts(&candidate);
        if let Some(first) = scripts.first() {
            let is_directory_extension = candidate.join(DEPENDENCY_MANIFEST).is_file()
                || scripts.len() > 1
                || candidate.join(ENTRY_POINT).is_file();

            return Some(if is_directory_extension {
                ResolvedSource::new(candidate, SourceKind::DirectoryExtension)
            } else {
                ResolvedSource::new(first.clone(), SourceKind::File)
            });
        }
    }

    let direct = ext_dir.join(format!("{name}.ts"));
    direct
        .is_file()
        .then(|| ResolvedSource::new(direct, SourceKind::File))
}

/// Eligible script files directly inside `dir`, sorted by name.
pub fn eligible_scripts(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut scripts: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_eligible_script)
        })
        .collect();
    scripts.sort();
    scripts
}

/// A skill directory is a collection when it has no marker of its own but
/// at least one marker somewhere below it.
pub fn is_skill_collection(paths: &Paths, name: &str) -> bool {
    if validate_name(Category::Skill, name).is_err() {
        return false;
    }

    let candidate = paths.source_dir(Category::Skill).join(name);
    if !candidate.is_dir() || candidate.join(SKILL_MARKER).is_file() {
        return false;
    }

    WalkDir::new(&candidate)
        .min_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|e| e.file_type().is_file() && e.file_name() == SKILL_MARKER)
}

/// Reject names that could escape the category directory.
///
/// Skills may use one `collection/member` separator; every other category
/// takes a single path segment.
pub fn validate_name(category: Category, name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.contains('\\') {
        bail!("name must not contain '\\'");
    }

    let path = Path::new(name);
    if path.is_absolute() {
        bail!("name must not be an absolute path");
    }

    let mut segments = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => segments += 1,
            other => bail!("name contains invalid path component: {:?}", other),
        }
    }

    let max_segments = if category.allows_nested_names() { 2 } else { 1 };
    if segments > max_segments || name.split('/').any(str::is_empty) {
        bail!("{} names allow at most {} segment(s)", category.label(), max_segments);
    }

    Ok(())
}
