mod commands;
mod core;

use crate::core::error::{ReleaseError, print_error};
use clap::Parser;
use std::path::PathBuf;

/// Create project releases: version rewrite, commit and annotated tag
#[derive(Parser)]
#[command(name = "release-tool")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Version to release
  #[arg(short = 'r', long = "release-version", value_name = "VERSION")]
  release_version: String,

  /// Project directory (defaults to the current directory)
  path: Option<PathBuf>,

  /// Development version to commit after the release (two-commit flow)
  #[arg(long, value_name = "VERSION")]
  next_version: Option<String>,

  /// Show the release plan without making changes
  #[arg(long)]
  dry_run: bool,

  /// Output the dry-run plan in JSON format
  #[arg(long, requires = "dry_run")]
  json: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
}

fn main() {
  let cli = Cli::parse();

  let result = commands::run_release(
    cli.path,
    &cli.release_version,
    cli.next_version,
    cli.dry_run,
    cli.json,
  );

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
