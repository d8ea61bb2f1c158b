//! Error types for zon-release with contextual messages and exit codes
//!
//! Every failure propagates to `main`, which prints it together with an
//! optional help line and exits with the mapped code. Nothing is recovered
//! locally: the surrounding pipeline step is the unit of error handling.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for zon-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, manifest content)
  User = 1,
  /// System error (I/O, git, network, hosting API)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for zon-release
#[derive(Debug)]
pub enum ZonError {
  /// Configuration errors
  Config(ConfigError),

  /// Manifest content errors
  Manifest(ManifestError),

  /// Hosting API errors
  Api(ApiError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Structured error with context prepended
  Context { context: String, source: Box<ZonError> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ZonError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ZonError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ZonError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Structured variants keep their exit code and help text under the context.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ZonError::Message { message, context, help } => ZonError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => ZonError::Context {
        context: ctx_str,
        source: Box::new(other),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ZonError::Config(_) => ExitCode::User,
      ZonError::Manifest(_) => ExitCode::User,
      ZonError::Api(_) => ExitCode::System,
      ZonError::Git(_) => ExitCode::System,
      ZonError::Io(_) => ExitCode::System,
      ZonError::Context { source, .. } => source.exit_code(),
      ZonError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ZonError::Config(e) => e.help_message(),
      ZonError::Manifest(e) => e.help_message(),
      ZonError::Api(e) => e.help_message(),
      ZonError::Git(e) => e.help_message(),
      ZonError::Context { source, .. } => source.help_message(),
      ZonError::Message { help, .. } => help.clone(),
      ZonError::Io(_) => None,
    }
  }
}

impl fmt::Display for ZonError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ZonError::Config(e) => write!(f, "{}", e),
      ZonError::Manifest(e) => write!(f, "{}", e),
      ZonError::Api(e) => write!(f, "{}", e),
      ZonError::Git(e) => write!(f, "{}", e),
      ZonError::Io(e) => write!(f, "I/O error: {}", e),
      ZonError::Context { context, source } => write!(f, "{}\n{}", context, source),
      ZonError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ZonError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ZonError::Io(e) => Some(e),
      ZonError::Context { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for ZonError {
  fn from(err: io::Error) -> Self {
    ZonError::Io(err)
  }
}

impl From<String> for ZonError {
  fn from(msg: String) -> Self {
    ZonError::message(msg)
  }
}

impl From<&str> for ZonError {
  fn from(msg: &str) -> Self {
    ZonError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ZonError {
  fn from(err: toml_edit::de::Error) -> Self {
    ZonError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ZonError {
  fn from(err: serde_json::Error) -> Self {
    ZonError::message(format!("JSON error: {}", err))
  }
}

impl From<reqwest::Error> for ZonError {
  fn from(err: reqwest::Error) -> Self {
    ZonError::Api(ApiError::Transport {
      message: err.to_string(),
    })
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit --config path does not exist
  NotFound { path: PathBuf },

  /// Repository slug is not `owner/name`
  InvalidSlug { value: String },

  /// No repository configured and none could be detected
  RepositoryUnknown,

  /// Exported variable name is unusable
  InvalidVariable { name: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Drop --config to fall back to zon-release.toml discovery.".to_string()),
      ConfigError::InvalidSlug { .. } => Some("Use the form `owner/name`, e.g. `--repo pmf/mmc-cli`.".to_string()),
      ConfigError::RepositoryUnknown => Some(
        "Pass --repo, set GITHUB_REPOSITORY, add a [repository] table to zon-release.toml, \
         or run inside a clone whose `origin` points at GitHub."
          .to_string(),
      ),
      ConfigError::InvalidVariable { .. } => {
        Some("Variable names must be non-empty and contain no '=' or whitespace.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::InvalidSlug { value } => {
        write!(f, "Invalid repository slug '{}'", value)
      }
      ConfigError::RepositoryUnknown => {
        write!(f, "Could not determine which repository to query for release tags")
      }
      ConfigError::InvalidVariable { name } => {
        write!(f, "Invalid exported variable name '{}'", name)
      }
    }
  }
}

/// Manifest content errors
#[derive(Debug)]
pub enum ManifestError {
  /// No `.version` line to derive a tag from
  MissingVersion { path: PathBuf },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::MissingVersion { .. } => {
        Some("Add a line like `.version = \"1.2.3\",` to the manifest.".to_string())
      }
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::MissingVersion { path } => {
        write!(f, "No `.version` field found in {}", path.display())
      }
    }
  }
}

/// Hosting API errors
#[derive(Debug)]
pub enum ApiError {
  /// Request could not be sent or the body could not be read
  Transport { message: String },

  /// API answered with a non-success status
  Status { status: u16, url: String, body: String },

  /// API answered with a body we could not decode
  Decode { url: String, message: String },
}

impl ApiError {
  fn help_message(&self) -> Option<String> {
    match self {
      ApiError::Status { status: 401 | 403, .. } => {
        Some("Set GITHUB_TOKEN (or pass --token) with read access to the repository.".to_string())
      }
      ApiError::Status { status: 404, .. } => {
        Some("Check the repository slug; private repositories also need a token.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Transport { message } => write!(f, "Hosting API request failed: {}", message),
      ApiError::Status { status, url, body } => {
        write!(f, "Hosting API returned HTTP {} for {}", status, url)?;
        if !body.is_empty() {
          write!(f, "\n{}", body)?;
        }
        Ok(())
      }
      ApiError::Decode { url, message } => {
        write!(f, "Could not decode hosting API response from {}: {}", url, message)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { .. } => Some("Pass --repo when running outside a git checkout.".to_string()),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Result type alias for zon-release
pub type ZonResult<T> = Result<T, ZonError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ZonResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ZonResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ZonError>,
{
  fn context(self, ctx: impl Into<String>) -> ZonResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ZonResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ZonError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
