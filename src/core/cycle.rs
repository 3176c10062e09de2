//! Release steps and the fail-fast release cycle
//!
//! A cycle runs a fixed, ordered list of steps against one project/repository
//! pair for one target version. Steps are a closed set of variants sharing a
//! single `execute` contract; they carry no shared state beyond their injected
//! parameters, so a step list is reusable across runs.

use crate::core::error::{ConditionError, ProjectError, ReleaseError, ReleaseResult};
use crate::core::project::{CmakeProject, Project};
use crate::core::vcs::{Repository, SystemGit};
use std::path::Path;

/// Commit message template used when none is configured
///
/// The literal token `$v` is replaced with the target version.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "Release v$v";

/// Commit message for the post-release development bump
const NEXT_ITERATION_MESSAGE: &str = "Prepare next iteration";

/// One discrete unit of the release pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStep {
  /// Refuse to release on a dirty tree or an unchanged version
  Precondition,

  /// Rewrite the version in the project configuration
  UpdateVersion,

  /// Stage the configuration, commit, and create the annotated release tag
  CommitAndTag { message_template: String },

  /// Post-release bump to a development version (two-commit release flow)
  ///
  /// Ignores the target version entirely; not part of the default sequence.
  SetNextVersion { next_version: String },
}

impl ReleaseStep {
  /// Commit-and-tag step with the default message template
  pub fn commit_and_tag() -> Self {
    ReleaseStep::CommitAndTag {
      message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
    }
  }

  /// Default step sequence: precondition, version rewrite, commit and tag
  pub fn default_sequence() -> Vec<ReleaseStep> {
    vec![
      ReleaseStep::Precondition,
      ReleaseStep::UpdateVersion,
      ReleaseStep::commit_and_tag(),
    ]
  }

  /// Step name for plans and progress output
  pub fn name(&self) -> &'static str {
    match self {
      ReleaseStep::Precondition => "precondition",
      ReleaseStep::UpdateVersion => "update-version",
      ReleaseStep::CommitAndTag { .. } => "commit-and-tag",
      ReleaseStep::SetNextVersion { .. } => "set-next-version",
    }
  }

  /// Execute this step against one project/repository pair
  pub fn execute<P: Project, R: Repository>(
    &self,
    project: &mut P,
    repository: &R,
    target_version: &str,
  ) -> ReleaseResult<()> {
    match self {
      ReleaseStep::Precondition => {
        if repository.is_dirty()? {
          return Err(ReleaseError::Condition(ConditionError::DirtyWorkTree));
        }
        if project.version() == target_version {
          return Err(ReleaseError::Condition(ConditionError::VersionUnchanged {
            version: target_version.to_string(),
          }));
        }
        Ok(())
      }
      ReleaseStep::UpdateVersion => project.set_new_version(target_version),
      ReleaseStep::CommitAndTag { message_template } => {
        let message = render_message(message_template, target_version);
        repository.stage(&[Path::new(project.config_file())])?;
        repository.commit(&message)?;
        repository.create_tag(&format!("v{}", target_version), &message)
      }
      ReleaseStep::SetNextVersion { next_version } => {
        project.set_new_version(next_version)?;
        repository.stage(&[Path::new(project.config_file())])?;
        repository.commit(NEXT_ITERATION_MESSAGE)
      }
    }
  }
}

/// Substitute the literal `$v` token in `template` with the target version
pub fn render_message(template: &str, version: &str) -> String {
  template.replace("$v", version)
}

/// One project, one repository, and a fixed ordered step list
pub struct ReleaseCycle<P, R> {
  project: P,
  repository: R,
  steps: Vec<ReleaseStep>,
}

impl ReleaseCycle<CmakeProject, SystemGit> {
  /// Open the repository and project at `directory` with the given steps
  ///
  /// Fails with an unsupported-project error when the directory holds no
  /// CMakeLists.txt; repository errors propagate as-is.
  pub fn open(directory: &Path, steps: Vec<ReleaseStep>) -> ReleaseResult<Self> {
    let repository = SystemGit::open(directory)?;

    if !CmakeProject::is_present(directory) {
      return Err(ReleaseError::Project(ProjectError::Unsupported {
        path: directory.to_path_buf(),
      }));
    }

    let project = CmakeProject::load(directory)?;
    Ok(Self::new(project, repository, steps))
  }
}

impl<P: Project, R: Repository> ReleaseCycle<P, R> {
  /// Build a cycle from already-constructed collaborators
  pub fn new(project: P, repository: R, steps: Vec<ReleaseStep>) -> Self {
    Self {
      project,
      repository,
      steps,
    }
  }

  pub fn project(&self) -> &P {
    &self.project
  }

  pub fn repository(&self) -> &R {
    &self.repository
  }

  pub fn steps(&self) -> &[ReleaseStep] {
    &self.steps
  }

  /// Run every step in order for `target_version`, stopping at the first failure
  ///
  /// The target is trimmed once before any step runs. Nothing is rolled back on
  /// failure; a later run's precondition check sees whatever state was left
  /// behind (e.g. a rewritten but uncommitted configuration file).
  pub fn create_release(&mut self, target_version: &str) -> ReleaseResult<()> {
    let target = target_version.trim();

    for step in &self.steps {
      step.execute(&mut self.project, &self.repository, target)?;
    }

    Ok(())
  }
}
