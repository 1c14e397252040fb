use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::assignment::Assignment;

#[derive(Parser)]
#[command(author, version, about = "MiniExam04 tester shell", long_about = None)]
pub struct Cli {
    /// Root directory holding rendu/, submissions/ and testers/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Also print the verdict as a JSON object
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Test an assignment with a given file, or with the staged one
    Test {
        assignment: Assignment,
        /// Path to directory/file.c (if omitted, uses rendu/<assignment>/*.c)
        path: Option<PathBuf>,
    },
    /// Archive the staged submission from rendu and re-test it
    Push { assignment: Assignment },
    /// Interactive start (select, copy, test)
    Start,
}

/// Filesystem schema rooted at one directory. All durable and ephemeral
/// paths the harness touches are derived here.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
}

impl Layout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Durable staging directory for an assignment's submission.
    pub fn staging_dir(&self, assignment: Assignment) -> PathBuf {
        self.root.join("rendu").join(assignment.name())
    }

    /// Where timestamped submission bundles land.
    pub fn archive_dir(&self) -> PathBuf {
        self.root.join("submissions")
    }

    /// Ephemeral per-assignment build/execute working directory.
    pub fn build_dir(&self, assignment: Assignment) -> PathBuf {
        self.root.join(".mini_build").join(assignment.name())
    }

    /// User-given paths are interpreted relative to the root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_owned()
        } else {
            self.root.join(path)
        }
    }
}
