//! Item categories and their fixed naming rules.

use serde::Serialize;
use std::fmt;

/// Marker file that identifies a skill directory.
pub const SKILL_MARKER: &str = "SKILL.md";

/// Script extension for extensions.
pub const SCRIPT_EXTENSION: &str = "ts";

/// Declaration-only scripts are never synced.
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Dependency cache directory skipped while scanning extensions.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Dependency manifest that turns a directory into a directory extension.
pub const DEPENDENCY_MANIFEST: &str = "package.json";

/// Entry point that turns a directory into a directory extension.
pub const ENTRY_POINT: &str = "index.ts";

/// Non-script files copied along with a directory extension.
pub const EXTENSION_SUPPORT_FILES: &[&str] = &["package.json", "package-lock.json", ".gitignore"];

/// Well-known config files, both optional.
pub const CONFIG_FILES: &[&str] = &["AGENTS.md", "SYSTEM.md"];

/// A kind of syncable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Extension,
    Skill,
    Agent,
    Prompt,
    Theme,
    Config,
}

impl Category {
    /// Order used by `all`.
    pub const ALL: [Category; 6] = [
        Category::Extension,
        Category::Skill,
        Category::Agent,
        Category::Prompt,
        Category::Theme,
        Category::Config,
    ];

    /// Section order of `list`.
    pub const LIST_ORDER: [Category; 6] = [
        Category::Extension,
        Category::Skill,
        Category::Agent,
        Category::Prompt,
        Category::Config,
        Category::Theme,
    ];

    /// Section order of `status`.
    pub const STATUS_ORDER: [Category; 6] = [
        Category::Extension,
        Category::Skill,
        Category::Config,
        Category::Agent,
        Category::Prompt,
        Category::Theme,
    ];

    /// Singular label used in per-item messages.
    pub fn label(self) -> &'static str {
        match self {
            Category::Extension => "extension",
            Category::Skill => "skill",
            Category::Agent => "agent",
            Category::Prompt => "prompt",
            Category::Theme => "theme",
            Category::Config => "config",
        }
    }

    /// Plural label; also the directory name on both sides for every
    /// category except config, which lives at the root.
    pub fn plural(self) -> &'static str {
        match self {
            Category::Extension => "extensions",
            Category::Skill => "skills",
            Category::Agent => "agents",
            Category::Prompt => "prompts",
            Category::Theme => "themes",
            Category::Config => "config",
        }
    }

    /// Extension of single-file items, if the category has a fixed one.
    pub fn file_extension(self) -> Option<&'static str> {
        match self {
            Category::Extension => Some(SCRIPT_EXTENSION),
            Category::Agent | Category::Prompt => Some("md"),
            Category::Theme => Some("json"),
            Category::Skill | Category::Config => None,
        }
    }

    /// Whether names may carry a `collection/` prefix.
    pub fn allows_nested_names(self) -> bool {
        self == Category::Skill
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// True for `*.ts` files that are not `*.d.ts` declarations.
pub fn is_eligible_script(file_name: &str) -> bool {
    file_name.ends_with(".ts") && !file_name.ends_with(DECLARATION_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligible_script() {
        assert!(is_eligible_script("index.ts"));
        assert!(is_eligible_script("helper.ts"));
        assert!(!is_eligible_script("types.d.ts"));
        assert!(!is_eligible_script("README.md"));
        assert!(!is_eligible_script("index.tsx"));
    }

    #[test]
    fn test_only_skills_allow_nested_names() {
        for category in Category::ALL {
            assert_eq!(category.allows_nested_names(), category == Category::Skill);
        }
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(Category::Theme.file_extension(), Some("json"));
        assert_eq!(Category::Agent.file_extension(), Some("md"));
        assert_eq!(Category::Skill.file_extension(), None);
    }
}
