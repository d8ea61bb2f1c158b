//! Run context - build once in main, pass to every command
//!
//! Resolves configuration, manifest location and export targets a single
//! time so commands only deal with already-validated settings.

use crate::ci::Exporter;
use crate::core::config::ZonConfig;
use crate::core::error::{ConfigError, ZonError, ZonResult};
use crate::core::vcs::SystemGit;
use crate::release::RepoSlug;
use std::path::{Path, PathBuf};

/// Shared state for one invocation
#[derive(Debug, Clone)]
pub struct RunContext {
  /// Working directory the tool was started in
  pub root: PathBuf,

  /// Loaded (or default) configuration
  pub config: ZonConfig,

  /// Manifest to read, absolute or relative to `root`
  pub manifest_path: PathBuf,

  /// Export targets for later pipeline steps
  pub exporter: Exporter,
}

impl RunContext {
  /// Build the context from the working directory and global flags.
  ///
  /// `--config` must exist when given; otherwise discovery falls back to defaults.
  /// `--manifest` wins over the configured manifest path.
  pub fn build(root: &Path, config_path: Option<&Path>, manifest: Option<&Path>) -> ZonResult<Self> {
    let config = match config_path {
      Some(path) => ZonConfig::load(&root.join(path))?,
      None => ZonConfig::discover(root)?,
    };

    let manifest_path = root.join(manifest.unwrap_or(config.manifest.as_path()));

    Ok(Self {
      root: root.to_path_buf(),
      config,
      manifest_path,
      exporter: Exporter::from_env(),
    })
  }

  /// Repository to look release tags up in.
  ///
  /// Precedence: `--repo` / `GITHUB_REPOSITORY`, then `[repository]` in the
  /// config file, then the `origin` remote of the surrounding git checkout.
  pub fn resolve_repo(&self, flag: Option<&str>) -> ZonResult<RepoSlug> {
    if let Some(value) = flag.filter(|v| !v.trim().is_empty()) {
      return value.parse();
    }

    if let Some(repo) = &self.config.repository {
      return RepoSlug::new(repo.owner.trim(), repo.name.trim());
    }

    let git = match SystemGit::open(&self.root) {
      Ok(git) => git,
      Err(e) => {
        tracing::debug!(error = %e, "no git checkout to detect the repository from");
        return Err(ZonError::Config(ConfigError::RepositoryUnknown));
      }
    };

    let url = git.remote_url("origin")?.ok_or(ZonError::Config(ConfigError::RepositoryUnknown))?;
    let slug = RepoSlug::from_remote_url(&url).ok_or(ZonError::Config(ConfigError::RepositoryUnknown))?;
    tracing::debug!(%slug, %url, work_tree = %git.work_tree().display(), "detected repository from origin");
    Ok(slug)
  }

  /// Name to export: the configured fixed name, else the manifest's `.name`
  pub fn package_name<'a>(&'a self, extracted: Option<&'a str>) -> Option<&'a str> {
    self.config.name.as_deref().or(extracted)
  }
}
