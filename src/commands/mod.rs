//! CLI commands for zon-release
//!
//! - **extract**: read `.name` / `.version` from the manifest and export them
//! - **check**: extract, export, then ask the hosting service whether the version is already tagged
//!
//! All commands take `&RunContext` built once in main.

pub mod check;
pub mod extract;

pub use check::{CheckArgs, run_check};
pub use extract::run_extract;
