use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an audit run.
///
/// Per-package problems such as an unknown license are never errors; they
/// end up as violations instead.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status} and listed no packages: {stderr}")]
    ListingFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Unable to locate package.json in {}.", .path.display())]
    MissingManifest { path: PathBuf },

    #[error("Unable to read package.json in {}: {source}", .path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package.json in {}: {source}", .path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type AuditResult<T> = Result<T, AuditError>;
