//! Environment-file exports
//!
//! GitHub Actions reads process-wide variables from the file named by
//! `GITHUB_ENV` and step outputs from the file named by `GITHUB_OUTPUT`.
//! Entries use the delimiter form so values may contain any character:
//!
//! ```text
//! VERSION<<ghadelimiter_1f2e...
//! 1.2.3
//! ghadelimiter_1f2e...
//! ```

use crate::core::error::{ResultExt, ZonResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Writes exported variables and step outputs
#[derive(Debug, Clone, Default)]
pub struct Exporter {
  env_file: Option<PathBuf>,
  output_file: Option<PathBuf>,
}

impl Exporter {
  pub fn new(env_file: Option<PathBuf>, output_file: Option<PathBuf>) -> Self {
    Self { env_file, output_file }
  }

  /// Capture `GITHUB_ENV` / `GITHUB_OUTPUT` (empty values count as unset)
  pub fn from_env() -> Self {
    let path = |key: &str| std::env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from);
    Self::new(path("GITHUB_ENV"), path("GITHUB_OUTPUT"))
  }

  /// Export a process-wide variable for later steps
  pub fn export_variable(&self, name: &str, value: &str) -> ZonResult<()> {
    match &self.env_file {
      Some(path) => {
        append_entry(path, name, value).with_context(|| format!("Failed to export {} to {}", name, path.display()))?;
        tracing::debug!(name, value, file = %path.display(), "exported variable");
      }
      None => {
        tracing::debug!(name, value, "GITHUB_ENV not set, printing export");
        eprintln!("{}={}", name, value);
      }
    }
    Ok(())
  }

  /// Set a step output
  pub fn set_output(&self, name: &str, value: &str) -> ZonResult<()> {
    match &self.output_file {
      Some(path) => {
        append_entry(path, name, value)
          .with_context(|| format!("Failed to write output {} to {}", name, path.display()))?;
        tracing::debug!(name, value, file = %path.display(), "set step output");
      }
      None => tracing::debug!(name, value, "GITHUB_OUTPUT not set, skipping step output"),
    }
    Ok(())
  }
}

fn append_entry(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
  let delimiter = delimiter_for(value);
  let mut file = OpenOptions::new().create(true).append(true).open(path)?;
  write!(file, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}

/// A delimiter that does not occur in `value`
fn delimiter_for(value: &str) -> String {
  loop {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if !value.contains(&delimiter) {
      return delimiter;
    }
  }
}
