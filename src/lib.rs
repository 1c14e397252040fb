use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};

pub mod assignment;
pub mod build;
pub mod cases;
pub mod config;
pub mod error;
pub mod exec;
pub mod judge;
pub mod staging;

use assignment::Assignment;
use config::{Cli, Command, Layout};
use error::Error;
use exec::{Runner, SystemRunner};

/// Entry point behind the CLI. `Ok(true)` means the run's verdict passed;
/// `Ok(false)` maps to exit code 1 without an error message.
pub fn run(cli: Cli) -> Result<bool> {
    let layout = Layout::new(cli.root.clone());
    let runner = SystemRunner;

    match cli.command {
        Some(Command::Test { assignment, path }) => {
            cmd_test(&layout, assignment, path, cli.json, &runner)
        }
        Some(Command::Push { assignment }) => {
            staging::archive(&layout, assignment)?;
            // Re-test the staged copy so the archived snapshot is known good.
            cmd_test(&layout, assignment, None, cli.json, &runner)
        }
        Some(Command::Start) | None => cmd_start(&layout, cli.json, &runner),
    }
}

fn cmd_test(
    layout: &Layout,
    assignment: Assignment,
    path: Option<PathBuf>,
    json: bool,
    runner: &dyn Runner,
) -> Result<bool> {
    let source = match path {
        Some(path) => {
            let path = layout.resolve(&path);
            if !path.is_file() {
                return Err(Error::SourceNotFound(path).into());
            }
            path
        }
        None => staging::staged_source(layout, assignment)?,
    };
    run_test(layout, assignment, &source, json, runner)
}

/// Build, execute, judge. Build failures print the compiler's output
/// verbatim and count as a failed verdict; the artifact is never run.
fn run_test(
    layout: &Layout,
    assignment: Assignment,
    source: &Path,
    json: bool,
    runner: &dyn Runner,
) -> Result<bool> {
    let spec = assignment.spec();
    let source =
        fs::canonicalize(source).map_err(|_| Error::SourceNotFound(source.to_owned()))?;

    let artifact = match build::build(&spec, layout, &source, runner) {
        Ok(artifact) => artifact,
        Err(e) => match e.downcast::<Error>() {
            Ok(Error::BuildFailure { diagnostics }) => {
                print!("{diagnostics}");
                return Ok(false);
            }
            Ok(other) => return Err(other.into()),
            Err(e) => return Err(e),
        },
    };

    let workdir = layout.build_dir(assignment);
    let verdict = judge::judge(&spec, &artifact, &workdir, runner)?;
    if json {
        println!("{}", serde_json::to_string(&verdict)?);
    }
    Ok(verdict.passed())
}

/// Interactive flow: offer whatever is already staged, or prompt for an
/// assignment plus a source path, stage it, and test.
fn cmd_start(layout: &Layout, json: bool, runner: &dyn Runner) -> Result<bool> {
    println!("{}", "MiniExam04 Tester".bold());
    let theme = ColorfulTheme::default();
    let staged = staging::find_staged(layout);

    if staged.is_empty() {
        println!("{}", "No assignments found in rendu/ directory.".yellow());
        let index = Select::with_theme(&theme)
            .with_prompt("Select assignment")
            .items(&Assignment::ALL)
            .default(0)
            .interact()?;
        let assignment = Assignment::ALL[index];

        let path: String = Input::with_theme(&theme)
            .with_prompt("Path to your file (directory/file.c)")
            .interact_text()?;
        let source = layout.resolve(Path::new(&path));
        let dest = staging::stage(layout, assignment, &source)?;
        run_test(layout, assignment, &dest, json, runner)
    } else {
        println!("{}", "Found assignments in rendu/:".green());
        let items: Vec<String> = staged
            .iter()
            .map(|(assignment, path)| {
                format!("{} ({})", assignment, path.file_name().unwrap_or_default().to_string_lossy())
            })
            .collect();
        let index = Select::with_theme(&theme)
            .with_prompt("Select assignment")
            .items(&items)
            .default(0)
            .interact()?;
        let (assignment, source) = &staged[index];

        println!("Testing {} with {}", assignment, source.display());
        run_test(layout, *assignment, source, json, runner)
    }
}
