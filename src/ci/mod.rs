//! Handing values to later pipeline steps
//!
//! - **export**: `GITHUB_ENV` variables and `GITHUB_OUTPUT` step outputs

pub mod export;

pub use export::Exporter;
