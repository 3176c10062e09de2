//! Error types for release-tool with contextual messages and exit codes
//!
//! One unified error type categorizes failures and carries a suggestion toward
//! resolution where one exists. Every failure in the release pipeline is fatal;
//! nothing here supports retry or recovery.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (unsupported project, malformed declaration, invalid args)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Precondition failure (dirty working tree, version unchanged)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-tool
#[derive(Debug)]
pub enum ReleaseError {
  /// Project loading and declaration parsing errors
  Project(ProjectError),

  /// Git operation errors
  Git(GitError),

  /// Release precondition failures
  Condition(ConditionError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Project(_) => ExitCode::User,
      ReleaseError::Git(_) => ExitCode::System,
      ReleaseError::Condition(_) => ExitCode::Validation,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Project(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Condition(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Project(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Condition(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

/// Project-related errors
#[derive(Debug)]
pub enum ProjectError {
  /// Directory has no recognizable project configuration
  Unsupported { path: PathBuf },

  /// Configuration file disappeared between detection and read
  ConfigNotFound { file: PathBuf },

  /// Configuration file exists but the declaration cannot be parsed
  Parse { file: PathBuf, reason: ScanError },
}

impl ProjectError {
  fn help_message(&self) -> Option<String> {
    match self {
      ProjectError::Unsupported { .. } => {
        Some("Expected a CMakeLists.txt with a project(...) declaration.".to_string())
      }
      ProjectError::Parse { .. } => {
        Some("The declaration must contain a VERSION argument, e.g. project(Name VERSION 1.0.0).".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ProjectError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProjectError::Unsupported { path } => {
        write!(f, "'{}' does not contain a supported project type", path.display())
      }
      ProjectError::ConfigNotFound { file } => {
        write!(f, "Project configuration not found: {}", file.display())
      }
      ProjectError::Parse { file, reason } => {
        write!(f, "Failed to parse {}: {}", file.display(), reason)
      }
    }
  }
}

/// Reasons a project(...) declaration fails to scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
  /// No `project (` call found anywhere in the text
  NoDeclaration,
  /// A `project (` call was found but never closed with `)`
  UnterminatedCall,
  /// The call body has no tokens at all
  EmptyCall,
  /// The call body has no VERSION argument
  VersionKeyMissing,
  /// The VERSION argument has no following value token
  VersionValueMissing,
}

impl fmt::Display for ScanError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ScanError::NoDeclaration => write!(f, "no project(...) declaration found"),
      ScanError::UnterminatedCall => write!(f, "project( call is never closed"),
      ScanError::EmptyCall => write!(f, "project(...) declaration has no name"),
      ScanError::VersionKeyMissing => write!(f, "declaration has no VERSION argument"),
      ScanError::VersionValueMissing => write!(f, "VERSION argument has no value"),
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
      GitError::RepoNotFound { path } => Some(format!(
        "Initialize the repository first or check the path: {}",
        path.display()
      )),
      _ => None,
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

/// Release precondition failures
#[derive(Debug)]
pub enum ConditionError {
  /// Working tree differs from the last commit
  DirtyWorkTree,

  /// Target version equals the current version (exact string comparison)
  VersionUnchanged { version: String },
}

impl ConditionError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConditionError::DirtyWorkTree => {
        Some("Commit or stash your changes, then re-run the release.".to_string())
      }
      ConditionError::VersionUnchanged { .. } => {
        Some("Choose a target version different from the current one.".to_string())
      }
    }
  }
}

impl fmt::Display for ConditionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConditionError::DirtyWorkTree => {
        write!(f, "The project contains uncommitted changes")
      }
      ConditionError::VersionUnchanged { version } => {
        write!(f, "Version already up-to-date: {}", version)
      }
    }
  }
}

/// Result type alias for release-tool
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
