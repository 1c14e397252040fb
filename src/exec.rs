use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// What one child process produced. Non-zero exit is a normal value here,
/// never an `Err`; only spawn/IO failures are errors.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Merged stdout + stderr, in the order the child wrote them.
    pub output: String,
    pub status: i32,
    pub command: String,
    pub cwd: PathBuf,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Output with at most one trailing newline removed. The comparator
    /// applies no other normalization.
    pub fn trimmed_output(&self) -> &str {
        self.output.strip_suffix('\n').unwrap_or(&self.output)
    }
}

/// The single process-invocation seam. Both the toolchain and built
/// artifacts go through this, so tests can swap in a scripted runner.
pub trait Runner {
    fn run(&self, argv: &[OsString], cwd: &Path) -> Result<ExecutionResult>;
}

/// Real child processes via `std::process`. Blocks until the child exits;
/// there is no timeout, so a hung artifact hangs the harness.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, argv: &[OsString], cwd: &Path) -> Result<ExecutionResult> {
        let (program, args) = argv.split_first().context("empty command line")?;
        let command = display_argv(argv);
        log::debug!("spawning `{}` in {}", command, cwd.display());

        // One pipe for both streams, so interleaving is preserved exactly
        // as the child produced it.
        let (mut reader, writer) = io::pipe()?;
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{command}`"))?;
        // The Command still holds write ends of the pipe; drop them or the
        // read below never sees EOF.
        drop(cmd);

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let status = child.wait()?;

        Ok(ExecutionResult {
            output: String::from_utf8_lossy(&bytes).into_owned(),
            status: status_code(status),
            command,
            cwd: cwd.to_owned(),
        })
    }
}

fn display_argv(argv: &[OsString]) -> String {
    argv.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    // Signal death reports as 128+N, the shell convention; any abnormal
    // exit just needs to be non-zero for judging.
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(-1)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<OsString> {
        vec!["sh".into(), "-c".into(), script.into()]
    }

    #[test]
    fn nonzero_exit_is_a_value_not_an_error() {
        let r = SystemRunner.run(&sh("exit 3"), Path::new(".")).unwrap();
        assert_eq!(r.status, 3);
        assert!(!r.success());
    }

    #[test]
    fn stdout_and_stderr_are_merged_in_order() {
        let r = SystemRunner
            .run(&sh("echo one; echo two 1>&2; echo three"), Path::new("."))
            .unwrap();
        assert_eq!(r.output, "one\ntwo\nthree\n");
        assert!(r.success());
    }

    #[test]
    fn runs_in_the_given_working_directory() {
        let r = SystemRunner.run(&sh("pwd"), Path::new("/tmp")).unwrap();
        assert_eq!(r.trimmed_output(), "/tmp");
    }

    #[test]
    fn trimmed_output_strips_exactly_one_trailing_newline() {
        let mut r = SystemRunner.run(&sh("printf 'x\\n\\n'"), Path::new(".")).unwrap();
        assert_eq!(r.trimmed_output(), "x\n");
        r.output = "no newline".into();
        assert_eq!(r.trimmed_output(), "no newline");
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let argv: Vec<OsString> = vec!["/nonexistent/toolchain-xyz".into()];
        assert!(SystemRunner.run(&argv, Path::new(".")).is_err());
    }
}
