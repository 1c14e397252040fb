use std::path::PathBuf;

use crate::assignment::Assignment;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown assignment: {0}")]
    UnknownAssignment(String),

    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Toolchain exited non-zero. The diagnostics are the compiler's merged
    /// stdout/stderr, byte-for-byte; callers print them as-is.
    #[error("{diagnostics}")]
    BuildFailure { diagnostics: String },

    #[error("rendu/{0} is empty. Nothing staged.")]
    EmptyStaging(Assignment),

    #[error("rendu/{assignment} holds {count} source files, expected exactly one")]
    AmbiguousStaging { assignment: Assignment, count: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
