//! Enumerate installed packages.
//!
//! A [`DependencyLister`] produces the flat list of package directories
//! (see [`npm::NpmLister`]); [`load_packages`] turns each directory into a
//! [`PackageRecord`] by reading its `package.json`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::manifest::PackageManifest;
use crate::models::{DependencyMode, PackageRecord};

pub mod npm;

pub const MANIFEST_FILE: &str = "package.json";

pub trait DependencyLister {
    /// Installed package directories for `mode`, one per entry.
    fn list(&self, mode: DependencyMode) -> AuditResult<Vec<PathBuf>>;
}

/// List packages and load their manifests.
///
/// A listed directory without `package.json` aborts enumeration.
pub fn list_packages(
    lister: &dyn DependencyLister,
    mode: DependencyMode,
) -> AuditResult<Vec<PackageRecord>> {
    let paths = lister.list(mode)?;
    debug!("package manager listed {} {} directories", paths.len(), mode);
    load_packages(&paths)
}

pub fn load_packages(paths: &[PathBuf]) -> AuditResult<Vec<PackageRecord>> {
    paths.iter().map(|path| load_package(path)).collect()
}

fn load_package(path: &Path) -> AuditResult<PackageRecord> {
    let manifest_path = path.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(AuditError::MissingManifest {
            path: path.to_path_buf(),
        });
    }

    let content =
        std::fs::read_to_string(&manifest_path).map_err(|source| AuditError::ReadManifest {
            path: path.to_path_buf(),
            source,
        })?;
    let manifest =
        PackageManifest::parse(&content).map_err(|source| AuditError::InvalidManifest {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(PackageRecord::from_manifest(manifest, path))
}

/// Parse `--parseable` output: one path per line, blank lines ignored.
pub fn parse_listing(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}
