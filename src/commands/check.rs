//! Check command implementation
//!
//! stdout carries only the result (the version to release, or an empty line
//! when the tag already exists) so callers can capture it directly. Status
//! lines go to stderr.

use crate::commands::extract::extract_and_export;
use crate::core::context::RunContext;
use crate::core::error::ZonResult;
use crate::release::{GitHubTags, ReleaseDecision, check_release};
use serde::Serialize;

/// Flags for `zon-release check`
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
  /// `owner/name`, from `--repo` or `GITHUB_REPOSITORY`
  pub repo: Option<String>,
  /// API base URL, from `--api-url` or `GITHUB_API_URL`
  pub api_url: Option<String>,
  pub token: Option<String>,
  /// Commit identifier from `SHA`; accepted but not used for the lookup
  pub sha: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
  name: Option<&'a str>,
  repository: String,
  result: &'a str,
  #[serde(flatten)]
  decision: &'a ReleaseDecision,
}

/// Run the check command
pub fn run_check(ctx: &RunContext, args: CheckArgs, json: bool) -> ZonResult<()> {
  let extracted = extract_and_export(ctx)?;
  let version = extracted.fields.require_version(&extracted.manifest)?;

  if let Some(sha) = &args.sha {
    tracing::debug!(sha, "commit identifier supplied");
  }

  let repo = ctx.resolve_repo(args.repo.as_deref())?;
  let api_url = args.api_url.as_deref().or(ctx.config.api_url.as_deref());
  let source = GitHubTags::new(api_url, args.token)?;

  let decision = check_release(&source, &repo, version)?;
  ctx.exporter.set_output(&ctx.config.export.output, decision.result())?;

  if json {
    let report = CheckReport {
      name: extracted.fields.name.as_deref(),
      repository: repo.to_string(),
      result: decision.result(),
      decision: &decision,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  match &decision {
    ReleaseDecision::Released { matches, .. } => {
      eprintln!("✅ {} is already released in {}", version, repo);
      for tag in matches {
        eprintln!("   {}", tag.name);
      }
    }
    ReleaseDecision::Unreleased { .. } => {
      eprintln!("🚀 {} has no release tag in {} yet", version, repo);
    }
  }
  println!("{}", decision.result());

  Ok(())
}
