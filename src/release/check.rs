//! Release existence check
//!
//! A version counts as released as soon as the hosting service reports at
//! least one tag reference for `tags/<version>`.

use crate::core::error::ZonResult;
use crate::release::slug::RepoSlug;
use serde::Serialize;

/// Tag reference as reported by the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
  /// Full reference name, e.g. `refs/tags/1.2.3`
  pub name: String,
  /// Object the reference points at, when reported
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sha: Option<String>,
}

/// Where tag references are looked up
pub trait TagSource {
  /// All tag references matching `tags/<version>`
  fn matching_tags(&self, repo: &RepoSlug, version: &str) -> ZonResult<Vec<TagRef>>;
}

/// Outcome of a release check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReleaseDecision {
  /// A tag already exists; nothing to do
  Released { version: String, matches: Vec<TagRef> },
  /// No tag yet; downstream steps should release `version`
  Unreleased { version: String },
}

impl ReleaseDecision {
  /// String handed to the pipeline: empty when released, the version otherwise
  pub fn result(&self) -> &str {
    match self {
      ReleaseDecision::Released { .. } => "",
      ReleaseDecision::Unreleased { version } => version,
    }
  }
}

/// Ask `source` whether `version` is already tagged in `repo`
pub fn check_release(source: &dyn TagSource, repo: &RepoSlug, version: &str) -> ZonResult<ReleaseDecision> {
  let matches = source.matching_tags(repo, version)?;
  tracing::info!(repo = %repo, version, matches = matches.len(), "looked up release tags");

  if matches.is_empty() {
    Ok(ReleaseDecision::Unreleased {
      version: version.to_string(),
    })
  } else {
    Ok(ReleaseDecision::Released {
      version: version.to_string(),
      matches,
    })
  }
}
