//! File system utilities.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// True if anything (file, directory, or dangling symlink) sits at `path`.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove whatever sits at `path` without following symlinks.
///
/// Real directories are removed recursively; symlinks and files are
/// unlinked.
pub fn remove_entry(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;

    if meta.file_type().is_symlink() {
        remove_symlink(path)
    } else if meta.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file: {}", path.display()))
    }
}

#[cfg(unix)]
fn remove_symlink(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove symlink: {}", path.display()))
}

#[cfg(windows)]
fn remove_symlink(path: &Path) -> Result<()> {
    // Directory symlinks must be removed with remove_dir on Windows.
    fs::remove_file(path)
        .or_else(|_| fs::remove_dir(path))
        .with_context(|| format!("Failed to remove symlink: {}", path.display()))
}

/// Create a symlink at `link` pointing at `target` verbatim.
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link)
        .with_context(|| format!("Failed to create symlink: {}", link.display()))?;

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
        .with_context(|| format!("Failed to create symlink: {}", link.display()))?;
    }

    Ok(())
}

/// Copy a single file, keeping permissions and modification time.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} -> {}", src.display(), dst.display()))?;

    // Best effort: a read-only copy cannot be reopened for writing.
    let modified = fs::metadata(src).and_then(|m| m.modified());
    if let Ok(modified) = modified {
        let result = fs::File::options()
            .write(true)
            .open(dst)
            .and_then(|f| f.set_modified(modified));
        if let Err(e) = result {
            tracing::debug!(path = %dst.display(), error = %e, "Could not preserve modification time");
        }
    }

    Ok(())
}

/// Copy a directory recursively, preserving symbolic links.
pub fn copy_dir_all(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    // Refuse to copy a directory into itself.
    let src_canon = fs::canonicalize(src)
        .with_context(|| format!("Failed to resolve source: {}", src.display()))?;
    let dst_parent_canon = dst.parent().and_then(|p| fs::canonicalize(p).ok());
    if dst_parent_canon.is_some_and(|p| p.starts_with(&src_canon)) {
        bail!(
            "Cannot copy directory into itself: {} is inside {}",
            dst.display(),
            src_canon.display()
        );
    }

    copy_tree(src, dst)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create directory: {}", dst.display()))?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_tree(&entry.path(), &dst_path)?;
        } else if ty.is_symlink() {
            let target = fs::read_link(entry.path())?;
            create_symlink(&target, &dst_path)?;
        } else {
            copy_file(&entry.path(), &dst_path)?;
        }
    }
    Ok(())
}
