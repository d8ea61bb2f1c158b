use crate::core::error::{ConfigError, ResultExt, ZonError, ZonResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default manifest location, relative to the working directory
pub const DEFAULT_MANIFEST: &str = "build.zig.zon";

/// Default hosting API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Configuration for zon-release
/// Searched in order: zon-release.toml, .zon-release.toml, .github/zon-release.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonConfig {
  /// Manifest to read name/version from
  #[serde(default = "default_manifest")]
  pub manifest: PathBuf,

  /// Fixed package name; overrides the manifest's `.name` when set
  #[serde(default)]
  pub name: Option<String>,

  /// Hosting API base URL
  #[serde(default)]
  pub api_url: Option<String>,

  /// Fixed owner/repository pair to look tags up in
  #[serde(default)]
  pub repository: Option<RepositoryConfig>,

  #[serde(default)]
  pub export: ExportConfig,
}

fn default_manifest() -> PathBuf {
  PathBuf::from(DEFAULT_MANIFEST)
}

impl Default for ZonConfig {
  fn default() -> Self {
    Self {
      manifest: default_manifest(),
      name: None,
      api_url: None,
      repository: None,
      export: ExportConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
  pub owner: String,
  pub name: String,
}

/// Names of the variables handed to later pipeline steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
  #[serde(default = "default_name_var")]
  pub name_var: String,
  #[serde(default = "default_version_var")]
  pub version_var: String,
  /// Step output carrying the release-check result
  #[serde(default = "default_output")]
  pub output: String,
}

fn default_name_var() -> String {
  "NAME".to_string()
}

fn default_version_var() -> String {
  "VERSION".to_string()
}

fn default_output() -> String {
  "result".to_string()
}

impl Default for ExportConfig {
  fn default() -> Self {
    Self {
      name_var: default_name_var(),
      version_var: default_version_var(),
      output: default_output(),
    }
  }
}

impl ExportConfig {
  /// Reject names the env-file format cannot carry
  pub fn validate(&self) -> ZonResult<()> {
    for name in [&self.name_var, &self.version_var, &self.output] {
      if name.is_empty() || name.contains('=') || name.chars().any(char::is_whitespace) {
        return Err(ZonError::Config(ConfigError::InvalidVariable { name: name.clone() }));
      }
    }
    Ok(())
  }
}

impl ZonConfig {
  /// Find config file in search order: zon-release.toml, .zon-release.toml, .github/zon-release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("zon-release.toml"),
      path.join(".zon-release.toml"),
      path.join(".github").join("zon-release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the first file found under `root`, or defaults if there is none
  pub fn discover(root: &Path) -> ZonResult<Self> {
    match Self::find_config_path(root) {
      Some(path) => Self::load(&path),
      None => {
        tracing::debug!(root = %root.display(), "no zon-release.toml found, using defaults");
        Ok(Self::default())
      }
    }
  }

  /// Load config from an explicit file
  pub fn load(config_path: &Path) -> ZonResult<Self> {
    if !config_path.exists() {
      return Err(ZonError::Config(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> ZonResult<Self> {
    let config: ZonConfig = toml_edit::de::from_str(content)?;
    config.export.validate()?;
    if let Some(repo) = &config.repository
      && (repo.owner.trim().is_empty() || repo.name.trim().is_empty())
    {
      return Err(ZonError::Config(ConfigError::InvalidSlug {
        value: format!("{}/{}", repo.owner, repo.name),
      }));
    }
    Ok(config)
  }
}
