//! List and status views
//!
//! Both views are rebuilt from the file system on every call. Collection
//! is separated from rendering so the same data backs the human-readable
//! output and `--json`.

use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{CONFIG_FILES, Category, is_eligible_script};
use crate::config::Paths;
use crate::discovery::{list_category, split_collection};
use crate::output::Console;

/// Items available in one category of the skillz repository
#[derive(Debug, Serialize)]
pub struct AvailableSection {
    pub category: Category,
    pub items: Vec<String>,
}

/// Synced entries found in one category of the agent directory
#[derive(Debug, Serialize)]
pub struct StatusSection {
    pub category: Category,
    pub directory: PathBuf,
    /// `None` when the category directory does not exist
    pub entries: Option<Vec<DestinationEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationEntry {
    pub name: String,
    #[serde(flatten)]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// Symlink with its immediate, unresolved target
    Symlink { target: PathBuf },
    Copy,
    /// Real directory holding synced members
    Collection { members: Vec<DestinationEntry> },
}

impl DestinationEntry {
    fn observe(path: &Path, name: String) -> Self {
        let kind = match fs::read_link(path) {
            Ok(target) => EntryKind::Symlink { target },
            Err(_) => EntryKind::Copy,
        };
        Self { name, kind }
    }
}

/// Discovery results for every category.
pub fn collect_available(paths: &Paths) -> Vec<AvailableSection> {
    Category::LIST_ORDER
        .into_iter()
        .map(|category| AvailableSection {
            category,
            items: list_category(paths, category),
        })
        .collect()
}

/// Observed destination entries for every category.
pub fn collect_status(paths: &Paths) -> Vec<StatusSection> {
    Category::STATUS_ORDER
        .into_iter()
        .map(|category| {
            let directory = paths.dest_dir(category);
            let entries = match category {
                Category::Config => Some(config_entries(&directory)),
                _ => sorted_children(&directory)
                    .map(|children| category_entries(category, children)),
            };
            StatusSection {
                category,
                directory,
                entries,
            }
        })
        .collect()
}

fn category_entries(category: Category, children: Vec<PathBuf>) -> Vec<DestinationEntry> {
    children
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_string_lossy().into_owned();
            match category {
                Category::Extension => extension_entry(&path, file_name),
                Category::Skill => skill_entry(&path, file_name),
                _ => {
                    let ext = category.file_extension()?;
                    path.extension()
                        .is_some_and(|e| e == ext)
                        .then(|| DestinationEntry::observe(&path, file_name))
                }
            }
        })
        .collect()
}

/// Script files keep their name; directories (or extension-less
/// symlinks) are shown with a trailing slash.
fn extension_entry(path: &Path, file_name: String) -> Option<DestinationEntry> {
    if is_eligible_script(&file_name) {
        return Some(DestinationEntry::observe(path, file_name));
    }
    if path.is_dir() || (path.is_symlink() && path.extension().is_none()) {
        return Some(DestinationEntry::observe(path, format!("{file_name}/")));
    }
    None
}

fn skill_entry(path: &Path, file_name: String) -> Option<DestinationEntry> {
    if path.is_symlink() {
        return Some(DestinationEntry::observe(path, file_name));
    }
    if !path.is_dir() {
        return None;
    }
    if is_synced_collection(path) {
        let members = sorted_children(path)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| p.is_dir() || p.is_symlink())
            .filter_map(|p| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                Some(DestinationEntry::observe(&p, name))
            })
            .collect();
        return Some(DestinationEntry {
            name: format!("{file_name}/"),
            kind: EntryKind::Collection { members },
        });
    }
    Some(DestinationEntry::observe(path, file_name))
}

/// A real directory with at least one child that is a directory or symlink.
pub fn is_synced_collection(path: &Path) -> bool {
    if path.is_symlink() {
        return false;
    }
    sorted_children(path)
        .unwrap_or_default()
        .iter()
        .any(|child| child.is_dir() || child.is_symlink())
}

fn config_entries(agent_dir: &Path) -> Vec<DestinationEntry> {
    CONFIG_FILES
        .iter()
        .map(|name| (agent_dir.join(name), name))
        .filter(|(path, _)| path.exists() || path.is_symlink())
        .map(|(path, name)| DestinationEntry::observe(&path, name.to_string()))
        .collect()
}

fn sorted_children(dir: &Path) -> Option<Vec<PathBuf>> {
    if !dir.is_dir() {
        return None;
    }
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory");
            return None;
        }
    };
    let mut children: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    children.sort();
    Some(children)
}

/// Print the available view.
pub fn render_available(console: &Console, sections: &[AvailableSection]) {
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            console.blank();
        }
        console.info(format!("Available {}:", section.category.plural()).bold());

        if section.items.is_empty() {
            console.info("  (none)");
            continue;
        }

        let mut current_collection: Option<&str> = None;
        for item in &section.items {
            match split_collection(item) {
                (Some(collection), member) if section.category == Category::Skill => {
                    if current_collection != Some(collection) {
                        current_collection = Some(collection);
                        console.info(format!("  {}", format!("{collection}/").bold()));
                    }
                    console.info(format!("    - {member}"));
                }
                _ => {
                    current_collection = None;
                    console.info(format!("  - {item}"));
                }
            }
        }
    }
}

/// Print the status view.
pub fn render_status(console: &Console, sections: &[StatusSection]) {
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            console.blank();
        }
        console.info(format!(
            "{} ({}/)",
            format!("Synced {}:", section.category.plural()).bold(),
            section.directory.display()
        ));

        match &section.entries {
            None => console.info("  (directory not found)"),
            Some(entries) if entries.is_empty() => console.info("  (none)"),
            Some(entries) => {
                for entry in entries {
                    render_entry(console, entry, "  ");
                }
            }
        }
    }
}

fn render_entry(console: &Console, entry: &DestinationEntry, indent: &str) {
    match &entry.kind {
        EntryKind::Symlink { target } => console.info(format!(
            "{indent}{} -> {}",
            entry.name.green(),
            target.display()
        )),
        EntryKind::Copy => console.info(format!("{indent}{} (copied)", entry.name.blue())),
        EntryKind::Collection { members } => {
            console.info(format!("{indent}{}", entry.name.bold()));
            let nested = format!("{indent}  ");
            for member in members {
                render_entry(console, member, &nested);
            }
        }
    }
}
