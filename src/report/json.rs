use anyhow::Result;
use serde::Serialize;

use crate::models::{AuditReport, AuditedPackage, DependencyMode, ViolationRecord};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    mode: DependencyMode,
    strict: bool,
    allowed: &'a [String],
    compliant: bool,
    packages: &'a [AuditedPackage],
    violations: &'a [ViolationRecord],
}

/// Serialize the audit as a pretty-printed JSON document.
pub fn to_string(
    report: &AuditReport,
    mode: DependencyMode,
    strict: bool,
    allowed: &[String],
) -> Result<String> {
    let doc = JsonReport {
        mode,
        strict,
        allowed,
        compliant: report.is_compliant(),
        packages: &report.packages,
        violations: &report.violations,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
