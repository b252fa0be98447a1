use std::collections::HashMap;
use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{AuditReport, AuditedPackage, DependencyMode, ViolationRecord};

/// One line per violation, on stderr.
pub fn render_violations(violations: &[ViolationRecord]) {
    let badge = " ERROR ".on_red().white().bold();
    for violation in violations {
        eprintln!("{}", violation_line(&badge.to_string(), violation));
    }
}

fn violation_line(badge: &str, violation: &ViolationRecord) -> String {
    format!(
        "{} Module {} has an incompatible license '{}'.",
        badge,
        violation.package_name,
        violation.detected_license.as_deref().unwrap_or("unknown")
    )
}

/// Render the summary box and package tables.
pub fn render(report: &AuditReport, path: &Path, mode: DependencyMode, verbose: bool, quiet: bool) {
    let total = report.packages_checked();
    let violation_count = report.violations.len();
    let pass_count = total - violation_count;

    if quiet {
        println!(
            "Total: {}  Pass: {}  Violations: {}",
            total,
            pass_count.to_string().green(),
            violation_count.to_string().red(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "check-licenses".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Auditing: {} ({} dependencies)\n", path.display(), mode);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Packages checked : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Compliant     : {:>4}", "✓".green(), pass_count)
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Violations    : {:>4}  {}",
            "✗".red(),
            violation_count,
            summarize_licenses(report.packages.iter().filter(|p| !p.compliant))
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if violation_count > 0 {
        println!(" {} Incompatible licenses:\n", "[ERROR]".red().bold());
        render_table(report.packages.iter().filter(|p| !p.compliant));
        println!();
    }

    if verbose && pass_count > 0 {
        println!(" {} Compliant packages:\n", "[PASS]".green().bold());
        render_table(report.packages.iter().filter(|p| p.compliant));
        println!();
    }
}

fn render_table<'a>(packages: impl Iterator<Item = &'a AuditedPackage>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
        ]);

    for package in packages {
        let (verdict, color) = if package.compliant {
            ("✓ pass", Color::Green)
        } else {
            ("✗ error", Color::Red)
        };

        table.add_row(vec![
            Cell::new(&package.name),
            Cell::new(package.version.as_deref().unwrap_or("-")),
            Cell::new(package.license.as_deref().unwrap_or("unknown")),
            Cell::new(package.source.to_string()),
            Cell::new(verdict)
                .fg(color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

/// Top three licenses by count, e.g. `[GPL-3.0 (2), unknown (1)]`.
fn summarize_licenses<'a>(packages: impl Iterator<Item = &'a AuditedPackage>) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for package in packages {
        *counts
            .entry(package.license.as_deref().unwrap_or("unknown"))
            .or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
