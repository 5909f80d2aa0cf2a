//! Sync engine behaviour against real directory trees.

use pi_sync::discovery::list_category;
use pi_sync::installer::DependencyInstaller;
use pi_sync::{Category, Linker, Paths, SourceKind, SyncOptions, resolve};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct NoopInstaller;

impl DependencyInstaller for NoopInstaller {
    fn install(&self, _dir: &Path) -> anyhow::Result<()> {
        Ok(())
    }
}

fn setup() -> (TempDir, Paths) {
    let temp_dir = TempDir::new().unwrap();
    let paths = Paths::new(temp_dir.path().join("skillz"), temp_dir.path().join("agent"));
    fs::create_dir_all(&paths.skillz_dir).unwrap();
    (temp_dir, paths)
}

fn write(path: PathBuf, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn linker(paths: &Paths, use_symlink: bool, force: bool) -> Linker {
    let options = SyncOptions {
        use_symlink,
        force,
        dry_run: false,
        quiet: true,
    };
    Linker::new(paths.clone(), options).with_installer(NoopInstaller)
}

fn superpowers(paths: &Paths) {
    let skills = paths.source_dir(Category::Skill);
    write(skills.join("superpowers/brainstorming/SKILL.md"), "# brainstorming");
    write(skills.join("superpowers/planning/SKILL.md"), "# planning");
}

#[test]
fn test_skill_collection_is_discovered_as_members() {
    let (_tmp, paths) = setup();
    superpowers(&paths);

    assert_eq!(
        list_category(&paths, Category::Skill),
        vec!["superpowers/brainstorming", "superpowers/planning"]
    );
}

#[test]
fn test_collection_sync_matches_individual_sync() {
    let (_tmp_a, by_collection) = setup();
    let (_tmp_b, by_member) = setup();
    superpowers(&by_collection);
    superpowers(&by_member);

    let collection_result = linker(&by_collection, false, false)
        .sync_category(Category::Skill, &["superpowers".to_string()]);
    let member_result = linker(&by_member, false, false).sync_category(
        Category::Skill,
        &[
            "superpowers/brainstorming".to_string(),
            "superpowers/planning".to_string(),
        ],
    );

    assert_eq!(collection_result, member_result);
    assert_eq!(collection_result.applied, 2);
    for member in ["brainstorming", "planning"] {
        let rel = format!("skills/superpowers/{member}/SKILL.md");
        assert_eq!(
            fs::read_to_string(by_collection.agent_dir.join(&rel)).unwrap(),
            fs::read_to_string(by_member.agent_dir.join(&rel)).unwrap()
        );
    }
}

#[test]
fn test_single_file_extension_resolves_to_file() {
    let (_tmp, paths) = setup();
    let src = paths.source_dir(Category::Extension).join("foo.ts");
    write(src.clone(), "export {}");

    let resolved = resolve(&paths, Category::Extension, "foo").unwrap();
    assert_eq!(resolved.path, src);
    assert_eq!(resolved.kind, SourceKind::File);
}

#[test]
fn test_entry_point_extension_is_directory_in_every_mode() {
    let (_tmp, paths) = setup();
    let ext = paths.source_dir(Category::Extension).join("bar");
    write(ext.join("index.ts"), "");
    write(ext.join("helper.ts"), "");

    for (use_symlink, force) in [(true, false), (false, false), (true, true), (false, true)] {
        let linker = linker(&paths, use_symlink, force);
        let resolved = resolve(linker.paths(), Category::Extension, "bar").unwrap();
        assert_eq!(resolved.kind, SourceKind::DirectoryExtension);
        assert_eq!(
            linker.destination(Category::Extension, "bar", &resolved),
            paths.agent_dir.join("extensions/bar")
        );
    }
}

#[test]
#[cfg(unix)]
fn test_symlink_target_resolves_to_source() {
    let (_tmp, paths) = setup();
    superpowers(&paths);
    write(paths.source_dir(Category::Extension).join("foo.ts"), "");

    linker(&paths, true, false).sync_all();

    let dest = paths.agent_dir.join("skills/superpowers/planning");
    assert_eq!(
        fs::canonicalize(&dest).unwrap(),
        fs::canonicalize(paths.source_dir(Category::Skill).join("superpowers/planning")).unwrap()
    );
    let ext = paths.agent_dir.join("extensions/foo.ts");
    assert!(ext.is_symlink());
}

#[test]
fn test_copy_is_byte_identical() {
    let (_tmp, paths) = setup();
    let bytes: Vec<u8> = (0u8..=255).collect();
    let src = paths.source_dir(Category::Theme).join("binary.json");
    fs::create_dir_all(src.parent().unwrap()).unwrap();
    fs::write(&src, &bytes).unwrap();

    let result = linker(&paths, false, false).sync_category(Category::Theme, &[]);

    assert_eq!(result.applied, 1);
    let dest = paths.agent_dir.join("themes/binary.json");
    assert!(!dest.is_symlink());
    assert_eq!(fs::read(dest).unwrap(), bytes);
}

#[test]
fn test_rerun_without_force_leaves_destination_untouched() {
    let (_tmp, paths) = setup();
    let src = paths.source_dir(Category::Agent).join("scout.md");
    write(src.clone(), "v1");

    let first = linker(&paths, false, false).sync_category(Category::Agent, &[]);
    assert_eq!(first.applied, 1);

    fs::write(&src, "v2").unwrap();
    let second = linker(&paths, false, false).sync_category(Category::Agent, &[]);

    assert_eq!(second.applied, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(
        fs::read_to_string(paths.agent_dir.join("agents/scout.md")).unwrap(),
        "v1"
    );
}

#[test]
fn test_force_replaces_file_with_directory() {
    let (_tmp, paths) = setup();
    write(paths.source_dir(Category::Skill).join("ast-grep/SKILL.md"), "new");
    let dest = paths.agent_dir.join("skills/ast-grep");
    write(dest.clone(), "old file");

    let result = linker(&paths, false, true).sync_category(Category::Skill, &[]);

    assert_eq!(result.applied, 1);
    assert!(dest.is_dir());
    assert_eq!(fs::read_to_string(dest.join("SKILL.md")).unwrap(), "new");
}

#[test]
fn test_force_replaces_copied_directory_content() {
    let (_tmp, paths) = setup();
    let src = paths.source_dir(Category::Skill).join("ast-grep");
    write(src.join("SKILL.md"), "v1");
    write(src.join("old.md"), "old");
    linker(&paths, false, false).sync_category(Category::Skill, &[]);

    fs::remove_file(src.join("old.md")).unwrap();
    write(src.join("SKILL.md"), "v2");
    linker(&paths, false, true).sync_category(Category::Skill, &[]);

    let dest = paths.agent_dir.join("skills/ast-grep");
    assert_eq!(fs::read_to_string(dest.join("SKILL.md")).unwrap(), "v2");
    assert!(!dest.join("old.md").exists());
}

#[test]
fn test_not_found_in_every_category() {
    let (_tmp, paths) = setup();
    let linker = linker(&paths, true, false);

    for category in Category::ALL {
        let result = linker.sync_category(category, &["missing-item".to_string()]);
        assert_eq!(result.not_found, 1, "category: {category}");
        assert_eq!(result.applied, 0);
    }
    assert!(!paths.agent_dir.exists());
}
