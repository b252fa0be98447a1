use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{LicenseSource, PackageRecord};

/// License file names checked inside a package directory, in order.
pub const LICENSE_FILES: &[&str] = &["LICENSE", "LICENSE.md", "MIT-LICENSE.txt"];

/// A phrase that identifies a license when found in its canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSignature {
    pub license: String,
    pub text: String,
}

pub fn default_signatures() -> Vec<LicenseSignature> {
    [
        (
            "BSD",
            "Redistributions in binary form must reproduce the above copyright notice,",
        ),
        ("MIT", "Permission is hereby granted, free of charge,"),
    ]
    .into_iter()
    .map(|(license, text)| LicenseSignature {
        license: license.to_string(),
        text: text.to_string(),
    })
    .collect()
}

pub fn default_license_files() -> Vec<String> {
    LICENSE_FILES.iter().map(|s| s.to_string()).collect()
}

/// Outcome of license detection for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub license: Option<String>,
    pub source: LicenseSource,
}

impl Detection {
    fn unknown() -> Self {
        Self {
            license: None,
            source: LicenseSource::Unknown,
        }
    }
}

/// Finds the most specific license a package exposes.
#[derive(Debug, Clone)]
pub struct LicenseDetector {
    files: Vec<String>,
    signatures: Vec<LicenseSignature>,
}

impl Default for LicenseDetector {
    fn default() -> Self {
        Self::new(default_license_files(), default_signatures())
    }
}

impl LicenseDetector {
    pub fn new(files: Vec<String>, signatures: Vec<LicenseSignature>) -> Self {
        Self { files, signatures }
    }

    /// License declared in the package's manifest, falling back to license
    /// files on disk when the manifest declares nothing.
    pub fn detect(&self, record: &PackageRecord) -> Detection {
        match &record.declared_license {
            Some(license) => Detection {
                license: Some(license.clone()),
                source: record.source,
            },
            None => self.sniff(&record.install_path),
        }
    }

    /// Match the first existing license file against the signature table.
    ///
    /// Only the first file found is read. Signatures are tried in table order
    /// and the first match wins.
    pub fn sniff(&self, install_path: &Path) -> Detection {
        let Some(file) = self
            .files
            .iter()
            .map(|name| install_path.join(name))
            .find(|candidate| candidate.is_file())
        else {
            return Detection::unknown();
        };

        let text = match std::fs::read(&file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                debug!("cannot read {}: {}", file.display(), err);
                return Detection::unknown();
            }
        };

        match self.signatures.iter().find(|sig| text.contains(&sig.text)) {
            Some(sig) => {
                debug!("{} matches the {} signature", file.display(), sig.license);
                Detection {
                    license: Some(sig.license.clone()),
                    source: LicenseSource::LicenseFile,
                }
            }
            None => {
                debug!("{} matches no known license text", file.display());
                Detection::unknown()
            }
        }
    }
}
