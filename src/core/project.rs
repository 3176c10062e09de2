//! Project contract and the CMake-backed implementation
//!
//! A project owns parsing and rewriting of the version declaration in its
//! configuration file. The release pipeline only sees the [`Project`] trait, so
//! alternative project formats can slot in without touching the pipeline.

use crate::core::declaration::Declaration;
use crate::core::error::{ProjectError, ReleaseError, ReleaseResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file identifying a CMake project
pub const CMAKE_CONFIG: &str = "CMakeLists.txt";

/// Contract the release pipeline holds against a project
pub trait Project {
  /// Project name as declared in its configuration
  fn name(&self) -> &str;

  /// Current version token
  fn version(&self) -> &str;

  /// Repository-relative path of the configuration file to stage
  fn config_file(&self) -> &str;

  /// Rewrite the version in the configuration file and update in-memory state
  fn set_new_version(&mut self, new_version: &str) -> ReleaseResult<()>;
}

/// CMake project backed by the `project(...)` declaration in its CMakeLists.txt
///
/// `name` and `version` are populated together from one successful scan; a
/// loaded project is never partially populated.
#[derive(Debug)]
pub struct CmakeProject {
  directory: PathBuf,
  name: String,
  version: String,
}

impl CmakeProject {
  /// Load the project at `directory` from its CMakeLists.txt
  pub fn load(directory: &Path) -> ReleaseResult<Self> {
    let file = config_path(directory);
    let content = read_config(&file)?;
    let decl = scan_config(&file, &content)?;

    Ok(Self {
      directory: directory.to_path_buf(),
      name: decl.name,
      version: decl.version,
    })
  }

  /// True if `directory` contains a CMakeLists.txt
  pub fn is_present(directory: &Path) -> bool {
    config_path(directory).is_file()
  }
}

impl Project for CmakeProject {
  fn name(&self) -> &str {
    &self.name
  }

  fn version(&self) -> &str {
    &self.version
  }

  fn config_file(&self) -> &str {
    CMAKE_CONFIG
  }

  /// Splice the new version over the declaration's value token
  ///
  /// Re-reads the file from disk (not from any cached copy), so a rewrite picks
  /// up concurrent edits to unrelated parts of the file. Every byte outside the
  /// version value token is preserved. The file is read and rewritten even when
  /// `new_version` equals the current version.
  fn set_new_version(&mut self, new_version: &str) -> ReleaseResult<()> {
    let file = config_path(&self.directory);
    let content = read_config(&file)?;
    let decl = scan_config(&file, &content)?;

    let mut updated = String::with_capacity(content.len() + new_version.len());
    updated.push_str(&content[..decl.version_span.start]);
    updated.push_str(new_version);
    updated.push_str(&content[decl.version_span.end..]);

    fs::write(&file, updated)
      .map_err(|e| ReleaseError::message(format!("Failed to write {}: {}", file.display(), e)))?;

    self.version = new_version.to_string();
    Ok(())
  }
}

fn config_path(directory: &Path) -> PathBuf {
  directory.join(CMAKE_CONFIG)
}

fn read_config(file: &Path) -> ReleaseResult<String> {
  if !file.is_file() {
    return Err(ReleaseError::Project(ProjectError::ConfigNotFound {
      file: file.to_path_buf(),
    }));
  }

  fs::read_to_string(file)
    .map_err(|e| ReleaseError::message(format!("Failed to read {}: {}", file.display(), e)))
}

fn scan_config(file: &Path, content: &str) -> ReleaseResult<Declaration> {
  Declaration::scan(content).map_err(|reason| {
    ReleaseError::Project(ProjectError::Parse {
      file: file.to_path_buf(),
      reason,
    })
  })
}
