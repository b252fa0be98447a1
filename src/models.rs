use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::manifest::PackageManifest;

/// One installed package, as listed by the package manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: Option<String>,
    pub install_path: PathBuf,
    /// License taken from `license` / `licenses` in `package.json`.
    /// File sniffing happens later, at audit time.
    pub declared_license: Option<String>,
    pub source: LicenseSource,
}

impl PackageRecord {
    pub fn from_manifest(manifest: PackageManifest, install_path: &Path) -> Self {
        let (declared_license, source) = match manifest.declared_license() {
            Some((license, source)) => (Some(license), source),
            None => (None, LicenseSource::Unknown),
        };

        Self {
            name: manifest.name.unwrap_or_else(|| "<unnamed>".to_string()),
            version: manifest.version,
            install_path: install_path.to_path_buf(),
            declared_license,
            source,
        }
    }
}

/// Which half of the dependency tree to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyMode {
    Production,
    Development,
    Both,
}

impl DependencyMode {
    /// Resolve the mode from the `--prod` / `--dev` flags.
    /// Neither or both selects the whole tree.
    pub fn from_flags(prod: bool, dev: bool) -> Self {
        match (prod, dev) {
            (true, false) => DependencyMode::Production,
            (false, true) => DependencyMode::Development,
            _ => DependencyMode::Both,
        }
    }
}

impl std::fmt::Display for DependencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyMode::Production => write!(f, "production"),
            DependencyMode::Development => write!(f, "development"),
            DependencyMode::Both => write!(f, "all"),
        }
    }
}

/// Where an effective license came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseSource {
    Manifest,
    LegacyArray,
    LicenseFile,
    Unknown,
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::Manifest => write!(f, "manifest"),
            LicenseSource::LegacyArray => write!(f, "licenses array"),
            LicenseSource::LicenseFile => write!(f, "license file"),
            LicenseSource::Unknown => write!(f, "unknown"),
        }
    }
}

/// A package whose license is not satisfied by any allowed license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub package_name: String,
    pub detected_license: Option<String>,
    pub install_path: PathBuf,
}

/// Per-package result kept for verbose and JSON reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditedPackage {
    pub name: String,
    pub version: Option<String>,
    pub license: Option<String>,
    pub source: LicenseSource,
    pub compliant: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditReport {
    pub packages: Vec<AuditedPackage>,
    pub violations: Vec<ViolationRecord>,
}

impl AuditReport {
    pub fn packages_checked(&self) -> usize {
        self.packages.len()
    }

    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    /// `0` when compliant, `1` when at least one violation was recorded.
    pub fn exit_code(&self) -> i32 {
        if self.is_compliant() {
            0
        } else {
            1
        }
    }
}
