use std::path::PathBuf;

use clap::Parser;

use crate::models::DependencyMode;

#[derive(Parser, Debug)]
#[command(
    name = "check-licenses",
    about = "Check installed npm dependencies against a license allow-list",
    version
)]
pub struct Cli {
    /// Project directory to audit (where `npm ls` runs)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Only audit production dependencies
    #[arg(long = "prod", visible_alias = "production")]
    pub prod: bool,

    /// Only audit development dependencies
    #[arg(long = "dev", visible_alias = "development")]
    pub dev: bool,

    /// Only accept GPL-2.0 compatible licenses
    #[arg(long)]
    pub gpl2: bool,

    /// Config file [default: ./.check-licenses/config.toml, fallback ~/.config/check-licenses/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// npm executable to run instead of the configured one
    #[arg(long, value_name = "BIN")]
    pub npm: Option<String>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// List compliant packages too, and log debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print violations and the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn mode(&self) -> DependencyMode {
        DependencyMode::from_flags(self.prod, self.dev)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["check-licenses"]);
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.mode(), DependencyMode::Both);
        assert!(!cli.gpl2);
        assert_eq!(cli.report, ReportFormat::Terminal);
    }

    #[test]
    fn test_mode_aliases() {
        let cli = Cli::parse_from(["check-licenses", "--production"]);
        assert_eq!(cli.mode(), DependencyMode::Production);

        let cli = Cli::parse_from(["check-licenses", "--development"]);
        assert_eq!(cli.mode(), DependencyMode::Development);

        let cli = Cli::parse_from(["check-licenses", "--prod", "--dev"]);
        assert_eq!(cli.mode(), DependencyMode::Both);
    }

    #[test]
    fn test_gpl2_and_json() {
        let cli = Cli::parse_from(["check-licenses", "app", "--gpl2", "--report", "json"]);
        assert!(cli.gpl2);
        assert_eq!(cli.path, PathBuf::from("app"));
        assert_eq!(cli.report, ReportFormat::Json);
    }
}
