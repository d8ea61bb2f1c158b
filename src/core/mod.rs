//! Core building blocks shared by all commands
//!
//! - **config**: zon-release.toml discovery and parsing
//! - **context**: per-invocation settings, built once in main
//! - **error**: error types with help messages and exit codes
//! - **vcs**: system git, used for `origin` detection

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
