//! `check-licenses` — audit installed npm dependencies against a license allow-list.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the config ([`config::load_config`]) and build the allow-list and
//!    license detector from it.
//! 3. List installed packages with `npm ls --parseable` ([`enumerator`]).
//! 4. Detect each package's license and check it ([`auditor`], [`detector`],
//!    [`license`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (compliant) or `1` (at least one violation, or a fatal error).

mod auditor;
mod cli;
mod config;
mod detector;
mod enumerator;
mod error;
mod license;
mod manifest;
mod models;
mod report;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use auditor::AuditSettings;
use cli::{Cli, ReportFormat};
use config::load_config;
use enumerator::npm::NpmLister;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;
    let mode = cli.mode();
    let settings = AuditSettings {
        mode,
        allow_list: config.allow_list(cli.gpl2),
        detector: config.detector(),
    };

    let npm = cli.npm.clone().unwrap_or_else(|| config.npm.command.clone());
    let lister = NpmLister::new(npm, &path);

    let interactive = !cli.quiet && cli.report == ReportFormat::Terminal;
    let spinner = interactive.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner());
        pb.set_message(format!("Listing {} dependencies…", mode));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = auditor::run(&settings, &lister);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = result?;

    if interactive {
        eprintln!(
            "  {} npm {} packages",
            "→".cyan(),
            report.packages_checked()
        );
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render_violations(&report.violations);
            report::terminal::render(&report, &path, mode, cli.verbose, cli.quiet);
        }
        ReportFormat::Json => {
            println!(
                "{}",
                report::json::to_string(&report, mode, cli.gpl2, settings.allow_list.licenses())?
            );
        }
    }

    if !report.is_compliant() {
        std::process::exit(report.exit_code());
    }

    Ok(())
}
