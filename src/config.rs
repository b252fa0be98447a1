use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::detector::{default_license_files, default_signatures, LicenseDetector, LicenseSignature};
use crate::enumerator::npm::default_command;
use crate::license::allowlist::{default_base, default_extra, AllowList};

/// Root configuration, deserialized from `.check-licenses/config.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub licenses: LicensesConfig,
    pub detection: DetectionConfig,
    pub npm: NpmConfig,
}

/// Which licenses are acceptable.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LicensesConfig {
    /// Licenses accepted in every mode. Defaults to the GPL-2.0 compatible set.
    pub allowed: Vec<String>,
    /// Licenses accepted unless `--gpl2` is given. Defaults to `Apache-2.0`.
    pub extra: Vec<String>,
}

impl Default for LicensesConfig {
    fn default() -> Self {
        Self {
            allowed: default_base(),
            extra: default_extra(),
        }
    }
}

/// How licenses are inferred for packages without a `license` field.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// License file names, checked in order.
    pub files: Vec<String>,
    /// Known license phrases, matched in order.
    pub signatures: Vec<LicenseSignature>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            files: default_license_files(),
            signatures: default_signatures(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NpmConfig {
    pub command: String,
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
        }
    }
}

impl Config {
    pub fn allow_list(&self, strict: bool) -> AllowList {
        AllowList::build(&self.licenses.allowed, &self.licenses.extra, strict)
    }

    pub fn detector(&self) -> LicenseDetector {
        LicenseDetector::new(self.detection.files.clone(), self.detection.signatures.clone())
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.check-licenses/config.toml`
/// 3. `~/.config/check-licenses/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".check-licenses").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("check-licenses")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
