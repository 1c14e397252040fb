use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::assignment::AssignmentSpec;
use crate::config::Layout;
use crate::error::Error;
use crate::exec::Runner;

/// Compiles `source` (plus the reference driver, for driver assignments)
/// inside the per-assignment build directory and returns the artifact path.
///
/// A non-zero toolchain exit becomes [`Error::BuildFailure`] carrying the
/// compiler's merged output untouched; line/column references in it matter
/// to the student, so nothing downstream may paraphrase it. The artifact is
/// left in the build dir and never cleaned up here.
pub fn build(
    spec: &AssignmentSpec,
    layout: &Layout,
    source: &Path,
    runner: &dyn Runner,
) -> Result<PathBuf> {
    let workdir = layout.build_dir(spec.assignment);
    fs::create_dir_all(&workdir)
        .with_context(|| format!("failed to create build dir {}", workdir.display()))?;
    // The toolchain runs with the build dir as cwd, so the root and source
    // must be absolute for the invocation to see them.
    let workdir = fs::canonicalize(&workdir)?;
    let root = fs::canonicalize(&layout.root)?;

    let argv = spec.compile_argv(&root, source);
    let result = runner.run(&argv, &workdir)?;
    if !result.success() {
        return Err(Error::BuildFailure {
            diagnostics: result.output,
        }
        .into());
    }
    Ok(workdir.join(spec.artifact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Assignment;
    use crate::exec::testing::FakeRunner;
    use tempdir::TempDir;

    fn layout() -> (TempDir, Layout) {
        let dir = TempDir::new("miniexam").unwrap();
        let layout = Layout::new(dir.path().to_owned());
        (dir, layout)
    }

    #[test]
    fn successful_build_yields_artifact_in_the_build_dir() {
        let (_dir, layout) = layout();
        let runner = FakeRunner::new(|_| (String::new(), 0));
        let spec = Assignment::Vbc.spec();
        let artifact = build(&spec, &layout, Path::new("/src/vbc.c"), &runner).unwrap();
        assert!(artifact.ends_with(".mini_build/vbc/vbc"));
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn toolchain_failure_surfaces_diagnostics_verbatim() {
        let (_dir, layout) = layout();
        let diag = "vbc.c:3:1: error: expected ';' before '}' token\n";
        let runner = FakeRunner::new(move |_| (diag.to_owned(), 1));
        let spec = Assignment::Vbc.spec();
        let err = build(&spec, &layout, Path::new("/src/vbc.c"), &runner).unwrap_err();
        match err.downcast::<Error>().unwrap() {
            Error::BuildFailure { diagnostics } => assert_eq!(diagnostics, diag),
            other => panic!("expected BuildFailure, got {other:?}"),
        }
    }

    #[test]
    fn invocation_carries_warning_flags_and_output_name() {
        let (_dir, layout) = layout();
        let runner = FakeRunner::new(|_| (String::new(), 0));
        let spec = Assignment::Picoshell.spec();
        build(&spec, &layout, Path::new("/src/picoshell.c"), &runner).unwrap();

        let calls = runner.calls.borrow();
        let argv: Vec<_> = calls[0].iter().map(|s| s.to_string_lossy().into_owned()).collect();
        assert_eq!(argv[0], "cc");
        assert!(argv.contains(&"-Wall".to_owned()));
        assert!(argv.contains(&"-Wextra".to_owned()));
        assert_eq!(argv[argv.len() - 2], "-o");
        assert_eq!(argv[argv.len() - 1], "test_picoshell");
        assert!(argv.iter().any(|a| a.ends_with("test_picoshell.c")));
    }
}
