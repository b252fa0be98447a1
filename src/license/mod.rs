//! License matching.
//!
//! - [`expression`] — decides whether one allowed license satisfies a declared
//!   `A OR B` expression.
//! - [`allowlist`] — builds the set of accepted licenses for a run and checks
//!   expressions against all of them.

pub mod allowlist;
pub mod expression;
