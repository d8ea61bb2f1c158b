//! GitHub tag lookup via the git matching-refs endpoint
//!
//! `GET /repos/{owner}/{repo}/git/matching-refs/tags/{version}` returns every
//! reference whose name starts with `refs/tags/{version}`. An empty array is
//! the normal "no tag" answer. Pages are followed through the `Link` header.

use crate::core::config::DEFAULT_API_URL;
use crate::core::error::{ApiError, ResultExt, ZonError, ZonResult};
use crate::release::{RepoSlug, TagRef, TagSource};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, LINK};
use serde::Deserialize;

const API_VERSION: &str = "2022-11-28";
const PER_PAGE: &str = "100";

/// Reference object as returned by the API
#[derive(Debug, Deserialize)]
struct ApiRef {
  #[serde(rename = "ref")]
  name: String,
  #[serde(default)]
  object: Option<ApiObject>,
}

#[derive(Debug, Deserialize)]
struct ApiObject {
  sha: String,
}

impl From<ApiRef> for TagRef {
  fn from(r: ApiRef) -> Self {
    TagRef {
      name: r.name,
      sha: r.object.map(|o| o.sha),
    }
  }
}

/// Blocking GitHub API client for tag lookups
#[derive(Debug, Clone)]
pub struct GitHubTags {
  base_url: Url,
  token: Option<String>,
  client: Client,
}

impl GitHubTags {
  /// Create with explicit configuration
  pub fn new(base_url: Option<&str>, token: Option<String>) -> ZonResult<Self> {
    let raw = base_url.unwrap_or(DEFAULT_API_URL);
    let base_url = Url::parse(raw).map_err(|e| {
      ZonError::with_help(
        format!("Invalid API URL '{}': {}", raw, e),
        "Use an absolute URL such as https://api.github.com",
      )
    })?;

    let client = Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      // The CI step timeout is the only deadline
      .timeout(None)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      base_url,
      token: token.filter(|t| !t.is_empty()),
      client,
    })
  }

  /// First-page URL for a tag lookup
  fn matching_refs_url(&self, repo: &RepoSlug, version: &str) -> ZonResult<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| ZonError::message(format!("API URL cannot carry a path: {}", self.base_url)))?
      .pop_if_empty()
      .extend(["repos", repo.owner.as_str(), repo.name.as_str(), "git", "matching-refs", "tags", version]);
    url.query_pairs_mut().append_pair("per_page", PER_PAGE);
    Ok(url)
  }

  fn get(&self, url: &Url) -> ZonResult<Response> {
    let mut req = self
      .client
      .get(url.clone())
      .header(ACCEPT, "application/vnd.github+json")
      .header("X-GitHub-Api-Version", API_VERSION);
    if let Some(ref token) = self.token {
      req = req.bearer_auth(token);
    }

    tracing::debug!(%url, authenticated = self.token.is_some(), "GET");
    let response = req.send()?;

    let status = response.status();
    if status.is_success() {
      Ok(response)
    } else {
      let body = response.text().unwrap_or_default();
      Err(ZonError::Api(ApiError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        body,
      }))
    }
  }
}

impl TagSource for GitHubTags {
  fn matching_tags(&self, repo: &RepoSlug, version: &str) -> ZonResult<Vec<TagRef>> {
    let mut next = Some(self.matching_refs_url(repo, version)?);
    let mut tags = Vec::new();

    while let Some(url) = next.take() {
      let response = self.get(&url)?;
      next = response
        .headers()
        .get(LINK)
        .and_then(|v| v.to_str().ok())
        .and_then(next_page_link)
        .and_then(|link| Url::parse(&link).ok());

      let body = response.text()?;
      let page: Vec<ApiRef> = serde_json::from_str(&body).map_err(|e| {
        ZonError::Api(ApiError::Decode {
          url: url.to_string(),
          message: e.to_string(),
        })
      })?;
      tags.extend(page.into_iter().map(TagRef::from));
    }

    Ok(tags)
  }
}

/// Extract the `rel="next"` target from a `Link` header
fn next_page_link(header: &str) -> Option<String> {
  header.split(',').find_map(|part| {
    let (target, params) = part.split_once(';')?;
    let is_next = params
      .split(';')
      .any(|p| matches!(p.trim(), "rel=\"next\"" | "rel=next"));
    if !is_next {
      return None;
    }
    let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
    Some(target.to_string())
  })
}
