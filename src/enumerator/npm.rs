use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use super::{parse_listing, DependencyLister};
use crate::error::{AuditError, AuditResult};
use crate::models::DependencyMode;

/// Default npm executable for the current platform.
pub fn default_command() -> String {
    if cfg!(windows) {
        "npm.cmd".to_string()
    } else {
        "npm".to_string()
    }
}

/// Lists installed packages with `npm ls --parseable --all`.
pub struct NpmLister {
    command: String,
    project_dir: PathBuf,
}

impl NpmLister {
    pub fn new(command: impl Into<String>, project_dir: &Path) -> Self {
        Self {
            command: command.into(),
            project_dir: project_dir.to_path_buf(),
        }
    }

    /// Arguments passed to npm for `mode`.
    pub fn args(mode: DependencyMode) -> Vec<&'static str> {
        let mut args = vec!["ls", "--parseable", "--all"];
        match mode {
            DependencyMode::Production => args.push("--prod"),
            DependencyMode::Development => args.push("--dev"),
            DependencyMode::Both => {}
        }
        args
    }
}

impl DependencyLister for NpmLister {
    fn list(&self, mode: DependencyMode) -> AuditResult<Vec<PathBuf>> {
        let args = Self::args(mode);
        debug!("running {} {}", self.command, args.join(" "));

        let output = Command::new(&self.command)
            .args(&args)
            .current_dir(&self.project_dir)
            .output()
            .map_err(|source| AuditError::Spawn {
                command: format!("{} {}", self.command, args.join(" ")),
                source,
            })?;

        let paths = parse_listing(&String::from_utf8_lossy(&output.stdout));
        if output.status.success() {
            return Ok(paths);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if paths.is_empty() {
            return Err(AuditError::ListingFailed {
                command: format!("{} {}", self.command, args.join(" ")),
                status: output.status,
                stderr,
            });
        }

        // npm exits non-zero for extraneous or missing packages but still
        // prints the listing.
        warn!("`{} ls` exited with {}: {}", self.command, output.status, stderr);
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_per_mode() {
        assert_eq!(NpmLister::args(DependencyMode::Both), ["ls", "--parseable", "--all"]);
        assert_eq!(
            NpmLister::args(DependencyMode::Production),
            ["ls", "--parseable", "--all", "--prod"]
        );
        assert_eq!(
            NpmLister::args(DependencyMode::Development),
            ["ls", "--parseable", "--all", "--dev"]
        );
    }

    #[cfg(unix)]
    fn fake_npm(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("npm");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_empty_listing_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let npm = fake_npm(dir.path(), "echo 'ENOENT: no package.json' >&2\nexit 254");

        let err = NpmLister::new(npm, dir.path())
            .list(DependencyMode::Both)
            .unwrap_err();
        assert!(matches!(err, AuditError::ListingFailed { .. }));
        assert!(err.to_string().contains("ENOENT: no package.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_listing_with_output_is_kept() {
        let dir = tempfile::TempDir::new().unwrap();
        let npm = fake_npm(dir.path(), "echo /app/node_modules/a\nexit 1");

        let paths = NpmLister::new(npm, dir.path())
            .list(DependencyMode::Both)
            .unwrap();
        assert_eq!(paths, vec![PathBuf::from("/app/node_modules/a")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_empty_listing_is_ok() {
        let dir = tempfile::TempDir::new().unwrap();
        let npm = fake_npm(dir.path(), "exit 0");

        let paths = NpmLister::new(npm, dir.path())
            .list(DependencyMode::Both)
            .unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let lister = NpmLister::new("check-licenses-no-such-npm", Path::new("."));
        assert!(matches!(
            lister.list(DependencyMode::Both),
            Err(AuditError::Spawn { .. })
        ));
    }
}
