//! Discovery of available items in the skillz repository
//!
//! Every listing is sorted and free of duplicates.

use std::collections::BTreeSet;
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

use crate::category::{CONFIG_FILES, Category, DEPENDENCY_CACHE_DIR, SKILL_MARKER, is_eligible_script};
use crate::config::Paths;

/// All names available in `category`.
pub fn list_category(paths: &Paths, category: Category) -> Vec<String> {
    let dir = paths.source_dir(category);
    if !dir.is_dir() {
        return Vec::new();
    }

    match category {
        Category::Extension => list_extensions(&dir),
        Category::Skill => list_skills(&dir),
        Category::Config => CONFIG_FILES
            .iter()
            .filter(|name| dir.join(name).is_file())
            .map(|name| name.to_string())
            .collect(),
        Category::Agent | Category::Prompt | Category::Theme => {
            list_files_with_extension(&dir, category.file_extension().unwrap_or_default())
        }
    }
}

/// Top-level scripts contribute their stem; scripts inside a directory
/// contribute that directory's name once.
fn list_extensions(ext_dir: &Path) -> Vec<String> {
    let mut names = BTreeSet::new();

    let walker = WalkDir::new(ext_dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != DEPENDENCY_CACHE_DIR);

    for entry in walker.filter_map(|e| e.ok()) {
        if !is_file_entry(&entry) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !is_eligible_script(&file_name) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(ext_dir) else {
            continue;
        };

        let mut parts = normal_components(rel);
        let name = if parts.len() > 1 {
            parts.swap_remove(0)
        } else {
            entry
                .path()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        if !name.is_empty() {
            names.insert(name);
        }
    }

    names.into_iter().collect()
}

/// A marker one level down yields a flat name; deeper markers yield
/// `collection/member` from the first two segments.
fn list_skills(skills_dir: &Path) -> Vec<String> {
    let mut names = BTreeSet::new();

    for entry in WalkDir::new(skills_dir)
        .min_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !is_file_entry(&entry) || entry.file_name() != SKILL_MARKER {
            continue;
        }
        let Some(skill_dir) = entry
            .path()
            .parent()
            .and_then(|p| p.strip_prefix(skills_dir).ok())
        else {
            continue;
        };

        let parts = normal_components(skill_dir);
        match parts.as_slice() {
            [] => {}
            [flat] => {
                names.insert(flat.clone());
            }
            [collection, member, ..] => {
                names.insert(format!("{collection}/{member}"));
            }
        }
    }

    names.into_iter().collect()
}

fn list_files_with_extension(dir: &Path, extension: &str) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .filter_map(|e| {
            e.path()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Regular files, plus symlinks that point at one.
fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Split `collection/member` into its parts; flat names have no collection.
pub fn split_collection(name: &str) -> (Option<&str>, &str) {
    match name.split_once('/') {
        Some((collection, member)) => (Some(collection), member),
        None => (None, name),
    }
}
