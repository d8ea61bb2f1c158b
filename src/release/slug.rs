//! Repository slug (`owner/name`) parsing

use crate::core::error::{ConfigError, ZonError, ZonResult};
use std::fmt;
use std::str::FromStr;

/// Hosted repository identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
  pub owner: String,
  pub name: String,
}

impl RepoSlug {
  pub fn new(owner: impl Into<String>, name: impl Into<String>) -> ZonResult<Self> {
    let owner = owner.into();
    let name = name.into();
    if !is_valid_segment(&owner) || !is_valid_segment(&name) {
      return Err(ZonError::Config(ConfigError::InvalidSlug {
        value: format!("{}/{}", owner, name),
      }));
    }
    Ok(Self { owner, name })
  }

  /// Parse a GitHub remote URL
  ///
  /// Accepts:
  /// - SSH: git@github.com:owner/name.git
  /// - SSH URL: ssh://git@github.com/owner/name.git
  /// - HTTPS: <https://github.com/owner/name> (with or without `.git`, trailing `/`)
  ///
  /// Returns `None` for other hosts and local paths.
  pub fn from_remote_url(url: &str) -> Option<Self> {
    let url = url.trim();

    let path = if let Some(rest) = url.strip_prefix("git@github.com:") {
      rest
    } else {
      let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .or_else(|| url.strip_prefix("ssh://"))
        .or_else(|| url.strip_prefix("git://"))?;
      // Drop credentials (`user@` / `x-access-token:...@`)
      let host_and_path = without_scheme.rsplit_once('@').map_or(without_scheme, |(_, rest)| rest);
      host_and_path.strip_prefix("github.com/")?
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let (owner, name) = path.split_once('/')?;
    if name.contains('/') {
      return None;
    }

    Self::new(owner, name).ok()
  }
}

/// Owner and repository names: non-empty, no separators or whitespace
fn is_valid_segment(segment: &str) -> bool {
  !segment.is_empty() && !segment.contains('/') && !segment.chars().any(char::is_whitespace)
}

impl FromStr for RepoSlug {
  type Err = ZonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ZonError::Config(ConfigError::InvalidSlug { value: s.to_string() });
    let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
    Self::new(owner, name).map_err(|_| invalid())
  }
}

impl fmt::Display for RepoSlug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}
