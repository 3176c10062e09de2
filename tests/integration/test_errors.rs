//! Integration tests for failure modes and exit codes

use crate::helpers::{TestProject, release_tool};
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_dirty_tree_fails_precondition() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;
  proj.write_config("project(Foo VERSION 0.1.2)\n# local edit\n")?;

  let output = release_tool(&proj.path, &["-r", "0.1.3"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr.contains("uncommitted changes"), "stderr: {}", stderr);

  // Nothing was released
  assert_eq!(proj.tags()?, Vec::<String>::new());
  Ok(())
}

#[test]
fn test_unchanged_version_fails_precondition() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;

  let output = release_tool(&proj.path, &["-r", "0.1.2"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr.contains("up-to-date"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_version_equality_is_exact_string_comparison() -> Result<()> {
  // "1.2" and "1.2.0" differ as strings, so the precondition passes
  let proj = TestProject::new("project(Foo VERSION 1.2)\n")?;

  let output = release_tool(&proj.path, &["-r", "1.2.0"])?;

  assert!(output.status.success());
  assert_eq!(proj.read_config()?, "project(Foo VERSION 1.2.0)\n");
  Ok(())
}

#[test]
fn test_missing_config_is_unsupported_project() -> Result<()> {
  let root = TempDir::new()?;
  crate::helpers::git(root.path(), &["init", "--initial-branch=main"])?;

  let output = release_tool(root.path(), &["-r", "1.0.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(
    stderr.contains("does not contain a supported project type"),
    "stderr: {}",
    stderr
  );
  Ok(())
}

#[test]
fn test_declaration_without_version_is_parse_error() -> Result<()> {
  let proj = TestProject::new("project(Foo LANGUAGES CXX)\n")?;

  let output = release_tool(&proj.path, &["-r", "1.0.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("VERSION"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_outside_repository_is_system_error() -> Result<()> {
  let root = TempDir::new()?;
  std::fs::write(root.path().join("CMakeLists.txt"), "project(Foo VERSION 0.1.0)\n")?;

  let output = release_tool(root.path(), &["-r", "1.0.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr.contains("repository"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_failed_release_leaves_rewrite_for_next_run() -> Result<()> {
  // Pre-existing tag: the rewrite and commit land, tag creation fails, and
  // nothing is unwound
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;
  crate::helpers::git(&proj.path, &["tag", "-a", "v0.1.3", "-m", "existing"])?;

  let output = release_tool(&proj.path, &["-r", "0.1.3"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr.contains("Git command failed"), "stderr: {}", stderr);

  // No rollback: the version rewrite was committed before the tag failed
  assert_eq!(proj.read_config()?, "project(Foo VERSION 0.1.3)\n");
  assert_eq!(proj.log_subjects(1)?, vec!["Release v0.1.3"]);
  Ok(())
}

#[test]
fn test_missing_release_version_flag_is_usage_error() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;

  let output = release_tool(&proj.path, &[])?;

  assert!(!output.status.success());
  assert_eq!(proj.tags()?, Vec::<String>::new());
  Ok(())
}
