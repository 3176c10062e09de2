//! Release command implementation
//!
//! Builds the release cycle for a project directory and either prints the plan
//! (dry-run) or applies it: precondition check, version rewrite in
//! CMakeLists.txt, release commit, annotated tag, and optionally a second
//! commit bumping to the next development version.

use crate::core::cycle::{DEFAULT_MESSAGE_TEMPLATE, ReleaseCycle, ReleaseStep, render_message};
use crate::core::error::ReleaseResult;
use crate::core::project::Project;
use crate::core::vcs::Repository;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

/// What a release run will do, computed before anything is touched
#[derive(Debug, Serialize)]
pub struct ReleasePlan {
  pub project: String,
  pub repository: String,
  pub current_version: String,
  pub target_version: String,
  pub tag: String,
  pub commit_message: String,
  pub config_file: String,
  pub dirty: bool,
  pub steps: Vec<String>,
}

/// Run the release command
pub fn run_release(
  path: Option<PathBuf>,
  release_version: &str,
  next_version: Option<String>,
  dry_run: bool,
  json: bool,
) -> ReleaseResult<()> {
  let directory = match path {
    Some(p) => p,
    None => env::current_dir()?,
  };
  let target = release_version.trim().to_string();

  let mut steps = ReleaseStep::default_sequence();
  if let Some(next) = &next_version {
    steps.push(ReleaseStep::SetNextVersion {
      next_version: next.clone(),
    });
  }

  let mut cycle = ReleaseCycle::open(&directory, steps)?;
  let repo_root = cycle.repository().work_tree().display().to_string();
  let plan = build_plan(&cycle, &target, repo_root)?;

  if dry_run {
    if json {
      println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
      print_plan(&plan);
      println!("🔍 Dry-run mode (no changes applied)");
    }
    return Ok(());
  }

  print_plan(&plan);
  println!("✅ Applying release...");

  cycle.create_release(&target)?;

  println!("   Updated {} to {}", plan.config_file, plan.target_version);
  println!("   Committed: {}", plan.commit_message);
  println!("   Created tag: {}", plan.tag);
  if let Some(next) = &next_version {
    println!("   Prepared next iteration: {}", next);
  }

  let head = cycle.repository().head_commit()?;
  let short = head.get(..7).unwrap_or(&head);

  println!();
  println!("✅ Release {} completed! (HEAD at {})", plan.target_version, short);
  println!();
  println!("Next steps:");
  println!("  git push origin --follow-tags");

  Ok(())
}

/// Assemble the plan for one cycle and target version
fn build_plan<P: Project, R: Repository>(
  cycle: &ReleaseCycle<P, R>,
  target: &str,
  repository: String,
) -> ReleaseResult<ReleasePlan> {
  let template = cycle
    .steps()
    .iter()
    .find_map(|step| match step {
      ReleaseStep::CommitAndTag { message_template } => Some(message_template.as_str()),
      _ => None,
    })
    .unwrap_or(DEFAULT_MESSAGE_TEMPLATE);

  Ok(ReleasePlan {
    project: cycle.project().name().to_string(),
    repository,
    current_version: cycle.project().version().to_string(),
    target_version: target.to_string(),
    tag: format!("v{}", target),
    commit_message: render_message(template, target),
    config_file: cycle.project().config_file().to_string(),
    dirty: cycle.repository().is_dirty()?,
    steps: cycle.steps().iter().map(|s| s.name().to_string()).collect(),
  })
}

fn print_plan(plan: &ReleasePlan) {
  println!("📦 Release Plan for '{}'", plan.project);
  println!();
  println!("  Repo:     {}", plan.repository);
  println!("  Current:  {}", plan.current_version);
  println!("  Target:   {}", plan.target_version);
  println!("  Tag:      {}", plan.tag);
  println!("  Commit:   {}", plan.commit_message);
  println!("  Steps:    {}", plan.steps.join(", "));

  if plan.dirty {
    println!();
    println!("  ⚠️  Working tree has uncommitted changes");
  }

  println!();
}
