use std::ffi::OsString;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::assignment::{AssignmentSpec, Strategy};
use crate::cases::{Expected, TestCase};
use crate::exec::Runner;

/// Running pass counter for a case-table run. `passed` can never exceed
/// `total`: `total` is fixed to the table length up front and `passed` only
/// increments on a passing case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Tally {
    pub passed: usize,
    pub total: usize,
}

impl Tally {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Verdict {
    /// The compiled-in reference driver judged itself; its exit status is
    /// authoritative.
    Driver { passed: bool },
    /// The harness judged each case of the table.
    Cases(Tally),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        match self {
            Verdict::Driver { passed } => *passed,
            Verdict::Cases(tally) => tally.all_passed(),
        }
    }
}

/// Runs the built artifact under the spec's strategy and returns the
/// verdict. `cwd` is the build directory the artifact lives in.
pub fn judge(
    spec: &AssignmentSpec,
    artifact: &Path,
    cwd: &Path,
    runner: &dyn Runner,
) -> Result<Verdict> {
    match spec.strategy {
        Strategy::Driver { .. } => {
            let result = runner.run(&[artifact.as_os_str().to_owned()], cwd)?;
            // The driver prints its own colored summary; forward it as-is.
            print!("{}", result.output);
            Ok(Verdict::Driver {
                passed: result.success(),
            })
        }
        Strategy::CaseTable(cases) => {
            println!(
                "\n{} {}",
                format!("[{} Tests]", spec.assignment).bold(),
                "(many cases)".cyan()
            );
            let tally = run_cases(artifact, cases, cwd, runner)?;
            if tally.all_passed() {
                println!(
                    "{} ({}/{})",
                    "All tests passed".green(),
                    tally.passed,
                    tally.total
                );
            } else {
                println!(
                    "{} ({}/{})",
                    "Some tests failed".red(),
                    tally.passed,
                    tally.total
                );
            }
            Ok(Verdict::Cases(tally))
        }
    }
}

/// One artifact invocation per case, in registration order. Cases are
/// independent: a failing case is recorded and the run continues.
fn run_cases(
    artifact: &Path,
    cases: &[TestCase],
    cwd: &Path,
    runner: &dyn Runner,
) -> Result<Tally> {
    let mut tally = Tally {
        passed: 0,
        total: cases.len(),
    };
    for case in cases {
        let argv: Vec<OsString> = vec![artifact.as_os_str().to_owned(), case.input.into()];
        let result = runner.run(&argv, cwd)?;
        let actual = result.trimmed_output();
        let (ok, label) = match case.expected {
            Expected::Success(expected) => (
                result.success() && actual == expected,
                format!("{} = {}", case.input, expected),
            ),
            Expected::Failure(expected) => (
                !result.success() && actual == expected,
                case.input.to_owned(),
            ),
        };
        if ok {
            tally.passed += 1;
            println!("  {} {}", "[PASS]".green(), label);
        } else {
            println!("  {} {}", "[FAIL]".red(), label);
        }
    }
    Ok(tally)
}
