//! Integration tests for the release pipeline happy paths

use crate::helpers::{TestProject, release_tool_ok};
use anyhow::Result;

#[test]
fn test_release_end_to_end() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;

  release_tool_ok(&proj.path, &["--release-version", "0.1.3"])?;

  assert_eq!(proj.read_config()?, "project(Foo VERSION 0.1.3)\n");
  assert_eq!(proj.log_subjects(1)?, vec!["Release v0.1.3"]);
  assert_eq!(proj.tags()?, vec!["v0.1.3"]);
  assert_eq!(proj.tag_message("v0.1.3")?, "Release v0.1.3");
  assert!(!proj.is_dirty()?, "Working tree should be clean after release");

  Ok(())
}

#[test]
fn test_release_accepts_positional_path() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 1.0.0)\n")?;
  let path = proj.path.to_string_lossy().to_string();

  // Run from elsewhere, passing the project directory as argument
  release_tool_ok(std::env::temp_dir().as_path(), &["-r", "1.1.0", &path])?;

  assert_eq!(proj.read_config()?, "project(Foo VERSION 1.1.0)\n");
  Ok(())
}

#[test]
fn test_release_preserves_surrounding_text() -> Result<()> {
  let cmake = "cmake_minimum_required(VERSION 3.16)\n\nproject (\n  Engine\n  VERSION 2.4.9\n  DESCRIPTION \"demo\"\n  LANGUAGES CXX C\n)\n\nadd_subdirectory(src)\ninstall(TARGETS engine)\n";
  let proj = TestProject::new(cmake)?;

  release_tool_ok(&proj.path, &["-r", "2.5.0"])?;

  assert_eq!(proj.read_config()?, cmake.replace("2.4.9", "2.5.0"));
  Ok(())
}

#[test]
fn test_release_trims_target_version() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;

  release_tool_ok(&proj.path, &["--release-version", "  0.1.3  "])?;

  assert_eq!(proj.read_config()?, "project(Foo VERSION 0.1.3)\n");
  assert_eq!(proj.tags()?, vec!["v0.1.3"]);
  Ok(())
}

#[test]
fn test_release_dry_run_changes_nothing() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;
  let head_before = proj.head()?;

  let output = release_tool_ok(&proj.path, &["-r", "0.1.3", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Dry-run"), "Should announce dry-run mode");
  assert_eq!(proj.read_config()?, "project(Foo VERSION 0.1.2)\n");
  assert_eq!(proj.head()?, head_before);
  assert!(proj.tags()?.is_empty());
  assert!(!proj.is_dirty()?);

  Ok(())
}

#[test]
fn test_release_dry_run_json_plan() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;

  let output = release_tool_ok(&proj.path, &["-r", "0.1.3", "--dry-run", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let plan: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(plan["project"], "Foo");
  assert_eq!(plan["current_version"], "0.1.2");
  assert_eq!(plan["target_version"], "0.1.3");
  assert_eq!(plan["tag"], "v0.1.3");
  assert_eq!(plan["commit_message"], "Release v0.1.3");
  assert_eq!(plan["dirty"], false);

  Ok(())
}

#[test]
fn test_release_with_next_version_two_commits() -> Result<()> {
  let proj = TestProject::new("project(Foo VERSION 0.1.2)\n")?;

  release_tool_ok(
    &proj.path,
    &["-r", "0.1.3", "--next-version", "0.2.0-dev"],
  )?;

  assert_eq!(proj.read_config()?, "project(Foo VERSION 0.2.0-dev)\n");
  assert_eq!(
    proj.log_subjects(2)?,
    vec!["Prepare next iteration", "Release v0.1.3"]
  );

  // The tag stays on the release commit, not the development bump
  assert_eq!(proj.tags()?, vec!["v0.1.3"]);
  assert_ne!(proj.tag_target("v0.1.3")?, proj.head()?);

  Ok(())
}

#[test]
fn test_release_multi_line_declaration() -> Result<()> {
  let proj = TestProject::new("project(\n  Widget\n  VERSION\n  7.0.1\n)\n")?;

  release_tool_ok(&proj.path, &["-r", "7.1.0"])?;

  assert_eq!(proj.read_config()?, "project(\n  Widget\n  VERSION\n  7.1.0\n)\n");
  assert_eq!(proj.tags()?, vec!["v7.1.0"]);
  Ok(())
}
