//! System git backend - zero crate dependencies
//!
//! Uses the system git binary for all working-copy operations. Every call goes
//! through one command builder with an isolated environment (only PATH and HOME
//! survive) and safe configuration overrides, so user config cannot change the
//! tool's behavior.

use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use crate::core::vcs::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using the system git binary
pub struct SystemGit {
  /// Repository working directory (the project directory)
  repo_path: PathBuf,

  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// Performs one subprocess call to resolve the working tree root, which also
  /// verifies the path belongs to a repository at all.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::with_help(
        format!("Failed to open git repository: {}", stderr),
        "Check that git is installed and the path is accessible.",
      ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root resolved at open time
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> ReleaseResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "HEAD"])
      .output()
      .context("Failed to get HEAD commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: "git rev-parse HEAD".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to the repo path
  /// - Clears environment variables, whitelisting only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

impl Repository for SystemGit {
  /// A tree is dirty when `git status --porcelain` prints anything, which
  /// covers modified, staged, and untracked state alike.
  fn is_dirty(&self) -> ReleaseResult<bool> {
    let output = self
      .git_cmd()
      .args(["status", "--porcelain"])
      .output()
      .context("Failed to check working tree state")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: "git status --porcelain".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
  }

  fn stage(&self, paths: &[&Path]) -> ReleaseResult<()> {
    let mut cmd = self.git_cmd();
    cmd.args(["add", "--"]);
    for path in paths {
      cmd.arg(path);
    }

    let output = cmd
      .output()
      .with_context(|| format!("Failed to stage {} path(s)", paths.len()))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: "git add".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  fn commit(&self, message: &str) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(["commit", "-m", message])
      .output()
      .context("Failed to commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: "git commit".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  fn create_tag(&self, name: &str, message: &str) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(["tag", "-a", name, "-m", message])
      .output()
      .context("Failed to create tag")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: format!("git tag -a {}", name),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }
}
