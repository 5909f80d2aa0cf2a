//! Dependency installation for copied directory extensions.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use crate::error::PiSyncError;

/// Installs the dependencies declared in a copied extension directory.
pub trait DependencyInstaller {
    fn install(&self, dir: &Path) -> Result<()>;
}

/// Runs `npm install --silent` in the extension directory.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    program: String,
    args: Vec<String>,
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            args: vec!["install".to_string(), "--silent".to_string()],
        }
    }
}

impl NpmInstaller {
    /// Use a different program, mainly for tests.
    pub fn with_command(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn label(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl DependencyInstaller for NpmInstaller {
    fn install(&self, dir: &Path) -> Result<()> {
        tracing::debug!(dir = %dir.display(), command = %self.label(), "Installing dependencies");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("Failed to execute: {}", self.label()))?;

        if !output.status.success() {
            tracing::debug!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Dependency install failed"
            );
            return Err(PiSyncError::InstallFailed {
                command: self.label(),
                dir: dir.to_path_buf(),
                code: output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_command() {
        assert_eq!(NpmInstaller::default().label(), "npm install --silent");
    }

    #[test]
    #[cfg(unix)]
    fn test_install_runs_in_directory() {
        let temp_dir = TempDir::new().unwrap();
        let installer = NpmInstaller::with_command("sh", &["-c", "touch installed"]);

        installer.install(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("installed").exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_install_reports_non_zero_exit() {
        let temp_dir = TempDir::new().unwrap();
        let installer = NpmInstaller::with_command("sh", &["-c", "exit 3"]);

        let err = installer.install(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("exit 3"));
    }

    #[test]
    fn test_install_reports_missing_program() {
        let temp_dir = TempDir::new().unwrap();
        let installer = NpmInstaller::with_command("pi-sync-no-such-program", &[]);

        assert!(installer.install(temp_dir.path()).is_err());
    }
}
