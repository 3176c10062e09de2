//! CLI commands for release-tool
//!
//! - **release**: run the fail-fast release pipeline (precondition check,
//!   version rewrite, commit + annotated tag), with dry-run planning, JSON
//!   plan output, and an optional post-release development bump

pub mod release;

pub use release::run_release;
