use tracing::debug;

use crate::detector::LicenseDetector;
use crate::enumerator::{list_packages, DependencyLister};
use crate::error::AuditResult;
use crate::license::allowlist::AllowList;
use crate::models::{AuditReport, AuditedPackage, DependencyMode, PackageRecord, ViolationRecord};

/// Everything one audit run needs, built once at startup.
#[derive(Debug, Clone)]
pub struct AuditSettings {
    pub mode: DependencyMode,
    pub allow_list: AllowList,
    pub detector: LicenseDetector,
}

/// Enumerate dependencies and check every one against the allow-list.
///
/// Enumeration failures abort the run. License problems never do: each
/// non-compliant package becomes a [`ViolationRecord`] and auditing continues.
pub fn run(settings: &AuditSettings, lister: &dyn DependencyLister) -> AuditResult<AuditReport> {
    let records = list_packages(lister, settings.mode)?;
    Ok(audit(settings, &records))
}

pub fn audit(settings: &AuditSettings, records: &[PackageRecord]) -> AuditReport {
    let mut report = AuditReport::default();

    for record in records {
        let detection = settings.detector.detect(record);
        let compliant = settings.allow_list.permits(detection.license.as_deref());

        debug!(
            "{}: {} ({}) -> {}",
            record.name,
            detection.license.as_deref().unwrap_or("unknown"),
            detection.source,
            if compliant { "ok" } else { "violation" }
        );

        if !compliant {
            report.violations.push(ViolationRecord {
                package_name: record.name.clone(),
                detected_license: detection.license.clone(),
                install_path: record.install_path.clone(),
            });
        }

        report.packages.push(AuditedPackage {
            name: record.name.clone(),
            version: record.version.clone(),
            license: detection.license,
            source: detection.source,
            compliant,
        });
    }

    report
}
