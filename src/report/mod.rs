//! Report renderers for audit results.
//!
//! - [`terminal`] — ERROR lines on stderr, then a summary box and tables;
//!   respects `--verbose` / `--quiet`.
//! - [`json`] — machine-readable document for CI.

pub mod json;
pub mod terminal;
