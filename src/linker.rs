//! Symbolic link and copy application
//!
//! Resolves requested items and links or copies each one into the pi
//! agent directory, honouring force and dry-run. Every failure is
//! reported and the batch moves on to the next item.

use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{
    CONFIG_FILES, Category, DEPENDENCY_MANIFEST, EXTENSION_SUPPORT_FILES, is_eligible_script,
};
use crate::config::{PI_SOURCE_DIR, Paths};
use crate::discovery::list_category;
use crate::fs::{copy_dir_all, copy_file, create_symlink, entry_exists, remove_entry};
use crate::installer::{DependencyInstaller, NpmInstaller};
use crate::output::Console;
use crate::resolver::{ResolvedSource, SourceKind, is_skill_collection, resolve};

/// Options for one invocation, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Symlink items; copy them when false
    pub use_symlink: bool,
    /// Replace existing destinations
    pub force: bool,
    /// Report what would be done without touching the file system
    pub dry_run: bool,
    /// Suppress informational output
    pub quiet: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            use_symlink: true,
            force: false,
            dry_run: false,
            quiet: false,
        }
    }
}

/// Outcome of applying a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Skipped,
    Failed,
}

/// Counts for a batch of items
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncResult {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub not_found: usize,
}

impl SyncResult {
    fn record(&mut self, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied => self.applied += 1,
            ApplyOutcome::Skipped => self.skipped += 1,
            ApplyOutcome::Failed => self.failed += 1,
        }
    }

    pub fn merge(&mut self, other: SyncResult) {
        self.applied += other.applied;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.not_found += other.not_found;
    }
}

/// Syncs items from the skillz repository into the agent directory
pub struct Linker {
    paths: Paths,
    options: SyncOptions,
    console: Console,
    installer: Box<dyn DependencyInstaller>,
}

impl Linker {
    pub fn new(paths: Paths, options: SyncOptions) -> Self {
        Self {
            paths,
            options,
            console: Console::new(options.quiet),
            installer: Box::new(NpmInstaller::default()),
        }
    }

    /// Replace the dependency installer used for copied directory extensions.
    pub fn with_installer(mut self, installer: impl DependencyInstaller + 'static) -> Self {
        self.installer = Box::new(installer);
        self
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Sync every category in order, ignoring item names.
    pub fn sync_all(&self) -> SyncResult {
        let mut result = SyncResult::default();
        for (i, category) in Category::ALL.into_iter().enumerate() {
            if i > 0 {
                self.console.blank();
            }
            result.merge(self.sync_category(category, &[]));
        }
        result
    }

    /// Sync the named items of a category, or all of them when `items` is empty.
    pub fn sync_category(&self, category: Category, items: &[String]) -> SyncResult {
        if category == Category::Config {
            return self.sync_config(items);
        }

        self.console
            .info(format!("Syncing {}...", category.plural()).bold());

        let mut result = SyncResult::default();
        let items = self.requested_items(category, items);
        if items.is_empty() {
            self.console.warn(format!("no {} found", category.plural()));
            return result;
        }

        // Distinct names can land on one destination (a single-script
        // directory `a/x.ts` and a top-level `x.ts`); the first one wins.
        let mut claimed: HashSet<PathBuf> = HashSet::new();
        for name in &items {
            let Some(source) = resolve(&self.paths, category, name) else {
                self.console
                    .warn(format!("{} not found: {}", category.label(), name));
                result.not_found += 1;
                continue;
            };

            let dest = self.destination(category, name, &source);
            if !claimed.insert(dest.clone()) {
                self.console.warn(format!(
                    "{} {} collides with an earlier item at {}, skipping",
                    category.label(),
                    name,
                    dest.display()
                ));
                result.record(ApplyOutcome::Skipped);
                continue;
            }
            result.record(self.apply(category, name, &source, &dest));
        }

        self.console.info(format!(
            "  {} {}(s) synced",
            result.applied.to_string().bold(),
            category.label()
        ));
        result
    }

    fn sync_config(&self, items: &[String]) -> SyncResult {
        self.console.info("Syncing config...".bold());

        let mut result = SyncResult::default();
        let explicit = !items.is_empty();
        let names: Vec<String> = if explicit {
            dedup(items.iter().cloned())
        } else {
            CONFIG_FILES.iter().map(|n| n.to_string()).collect()
        };

        for name in &names {
            match resolve(&self.paths, Category::Config, name) {
                Some(source) => {
                    let dest = self.destination(Category::Config, name, &source);
                    result.record(self.apply(Category::Config, name, &source, &dest));
                }
                None if explicit => {
                    self.console.warn(format!("config not found: {name}"));
                    result.not_found += 1;
                }
                None => {
                    if name == CONFIG_FILES[0] {
                        self.console
                            .info(format!("  no {name} found in {PI_SOURCE_DIR}/"));
                    }
                }
            }
        }

        if result.applied > 0 {
            self.console.info(format!(
                "  {} config file(s) synced",
                result.applied.to_string().bold()
            ));
        }
        result
    }

    /// Expand the request into the names to sync.
    ///
    /// An empty request means every discovered item. A bare skill
    /// collection name expands to its members; explicit
    /// `collection/member` names are taken as given. Duplicates are
    /// dropped, keeping the first occurrence.
    pub fn requested_items(&self, category: Category, items: &[String]) -> Vec<String> {
        if items.is_empty() {
            return list_category(&self.paths, category);
        }

        let mut expanded = Vec::with_capacity(items.len());
        for name in items {
            if category == Category::Skill && is_skill_collection(&self.paths, name) {
                let prefix = format!("{name}/");
                let members: Vec<String> = list_category(&self.paths, category)
                    .into_iter()
                    .filter(|s| s.starts_with(&prefix))
                    .collect();
                tracing::debug!(collection = %name, count = members.len(), "Expanded skill collection");
                expanded.extend(members);
            } else {
                expanded.push(name.clone());
            }
        }
        dedup(expanded)
    }

    /// Where a resolved item lands in the agent directory.
    pub fn destination(&self, category: Category, name: &str, source: &ResolvedSource) -> PathBuf {
        let dir = self.paths.dest_dir(category);
        match (category, source.kind) {
            (Category::Extension, SourceKind::File) => {
                dir.join(source.path.file_name().unwrap_or_else(|| OsStr::new(name)))
            }
            (Category::Agent | Category::Prompt | Category::Theme, _) => {
                let ext = category.file_extension().unwrap_or_default();
                dir.join(format!("{name}.{ext}"))
            }
            _ => dir.join(name),
        }
    }

    /// Link or copy one resolved item to `dest`.
    pub fn apply(
        &self,
        category: Category,
        name: &str,
        source: &ResolvedSource,
        dest: &Path,
    ) -> ApplyOutcome {
        match self.try_apply(category, name, source, dest) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.console
                    .warn(format!("failed to sync {} {}: {:#}", category.label(), name, e));
                ApplyOutcome::Failed
            }
        }
    }

    fn try_apply(
        &self,
        category: Category,
        name: &str,
        source: &ResolvedSource,
        dest: &Path,
    ) -> Result<ApplyOutcome> {
        let exists = entry_exists(dest);
        if exists && !self.options.force {
            self.console.warn(format!(
                "exists: {} (use --force to overwrite)",
                dest.display()
            ));
            return Ok(ApplyOutcome::Skipped);
        }

        if self.options.dry_run {
            self.report_dry_run(source, dest, exists);
            return Ok(ApplyOutcome::Applied);
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if exists {
            remove_entry(dest)?;
            tracing::debug!(dest = %dest.display(), "Removed existing destination");
        }

        let display = display_name(category, name, source, dest);

        if self.options.use_symlink {
            create_symlink(&source.path, dest)?;
            self.console.info(format!(
                "  {} {}: {}",
                "symlinked".green(),
                category.label(),
                display
            ));
            return Ok(ApplyOutcome::Applied);
        }

        match source.kind {
            SourceKind::File => copy_file(&source.path, dest)?,
            SourceKind::Directory => copy_dir_all(&source.path, dest)?,
            SourceKind::DirectoryExtension => {
                let has_manifest = copy_extension_dir(&source.path, dest)?;
                if has_manifest {
                    self.console.info(format!(
                        "  {} dependencies for {}...",
                        "installing".yellow(),
                        name
                    ));
                    if let Err(e) = self.installer.install(dest) {
                        self.console
                            .warn(format!("dependency install failed for {name}: {e:#}"));
                        return Ok(ApplyOutcome::Failed);
                    }
                }
            }
        }

        self.console.info(format!(
            "  {} {}: {}",
            "copied".green(),
            category.label(),
            display
        ));
        Ok(ApplyOutcome::Applied)
    }

    fn report_dry_run(&self, source: &ResolvedSource, dest: &Path, exists: bool) {
        let tag = "[dry-run]".blue();
        let mut line = if self.options.use_symlink {
            format!(
                "  {} symlink {} -> {}",
                tag,
                dest.display(),
                source.path.display()
            )
        } else {
            format!(
                "  {} copy {} -> {}",
                tag,
                source.path.display(),
                dest.display()
            )
        };

        if !self.options.use_symlink
            && source.kind == SourceKind::DirectoryExtension
            && source.path.join(DEPENDENCY_MANIFEST).is_file()
        {
            line.push_str(" (+ npm install)");
        }
        if exists {
            line.push_str(" (replacing existing)");
        }
        self.console.info(line);
    }
}

fn display_name(category: Category, name: &str, source: &ResolvedSource, dest: &Path) -> String {
    match (category, source.kind) {
        (_, SourceKind::DirectoryExtension) => format!("{name}/"),
        (Category::Skill, _) => name.to_string(),
        _ => dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string()),
    }
}

/// Copy the top-level scripts and support files of a directory extension.
///
/// Returns whether a dependency manifest was copied.
fn copy_extension_dir(src_dir: &Path, dst_dir: &Path) -> Result<bool> {
    fs::create_dir_all(dst_dir)
        .with_context(|| format!("Failed to create directory: {}", dst_dir.display()))?;

    let mut copied_manifest = false;
    for entry in fs::read_dir(src_dir)
        .with_context(|| format!("Failed to read directory: {}", src_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_eligible_script(file_name) || EXTENSION_SUPPORT_FILES.contains(&file_name) {
            copy_file(&path, &dst_dir.join(file_name))?;
            copied_manifest |= file_name == DEPENDENCY_MANIFEST;
        }
    }

    Ok(copied_manifest)
}

fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
