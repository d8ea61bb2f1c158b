//! `.name` / `.version` extraction
//!
//! Values are cleaned the same way for both fields: everything after the
//! first `=`, with every `"` and `,` removed, then trimmed. The last matching
//! line wins. Missing fields are `None`, never an error.

use crate::core::error::{ManifestError, ResultExt, ZonError, ZonResult};
use serde::Serialize;
use std::fs;
use std::path::Path;

const NAME_PREFIX: &str = ".name";
const VERSION_PREFIX: &str = ".version";

/// Fields extracted from a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestFields {
  pub name: Option<String>,
  pub version: Option<String>,
}

impl ManifestFields {
  /// Extract fields from raw manifest text
  pub fn parse(content: &str) -> Self {
    let mut fields = Self::default();

    for line in content.lines() {
      let line = line.trim();
      if line.starts_with(NAME_PREFIX) {
        if let Some(value) = field_value(line) {
          fields.name = Some(value);
        }
      } else if line.starts_with(VERSION_PREFIX)
        && let Some(value) = field_value(line)
      {
        fields.version = Some(value);
      }
    }

    fields
  }

  /// Read and extract fields from a manifest file
  pub fn load(path: &Path) -> ZonResult<Self> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read manifest {}", path.display()))?;
    // Invalid UTF-8 elsewhere in the file must not block extraction
    let fields = Self::parse(&String::from_utf8_lossy(&bytes));

    tracing::debug!(
      path = %path.display(),
      name = ?fields.name,
      version = ?fields.version,
      "extracted manifest fields"
    );
    if fields.version.is_some() && fields.semver().is_none() {
      tracing::warn!(version = ?fields.version, "manifest version is not valid semver");
    }

    Ok(fields)
  }

  /// Version to look release tags up by
  pub fn require_version(&self, path: &Path) -> ZonResult<&str> {
    self.version.as_deref().ok_or_else(|| {
      ZonError::Manifest(ManifestError::MissingVersion {
        path: path.to_path_buf(),
      })
    })
  }

  /// Version parsed as semver, if it is one
  pub fn semver(&self) -> Option<semver::Version> {
    self.version.as_deref().and_then(|v| semver::Version::parse(v).ok())
  }
}

/// Cleaned value of a `.field = "value",` line, or `None` when there is no `=`
///
/// The value runs to the end of the line, so `.version = "1.0.0+build=7"`
/// keeps `+build=7` instead of stopping at the second `=`.
fn field_value(line: &str) -> Option<String> {
  let (_, raw) = line.split_once('=')?;
  Some(raw.replace(['"', ','], "").trim().to_string())
}
