use std::{ffi::OsString, fmt, path::Path, str::FromStr};

use clap::ValueEnum;

use crate::cases::{TestCase, VBC_CASES};
use crate::error::Error;

/// Closed set of supported assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Assignment {
    #[value(name = "ft_popen")]
    FtPopen,
    #[value(name = "picoshell")]
    Picoshell,
    #[value(name = "vbc")]
    Vbc,
}

/// How a built artifact gets judged.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// A reference test driver is compiled in with the submission; the
    /// combined artifact prints its own summary and its exit status is the
    /// verdict. `tester` is the driver source, relative to the root.
    Driver { tester: &'static str },
    /// The harness runs the artifact once per case and judges the output
    /// itself.
    CaseTable(&'static [TestCase]),
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentSpec {
    pub assignment: Assignment,
    /// Name of the executable the toolchain writes into the build dir.
    pub artifact: &'static str,
    pub strategy: Strategy,
}

impl Assignment {
    pub const ALL: [Assignment; 3] = [Assignment::FtPopen, Assignment::Picoshell, Assignment::Vbc];

    pub fn name(self) -> &'static str {
        match self {
            Assignment::FtPopen => "ft_popen",
            Assignment::Picoshell => "picoshell",
            Assignment::Vbc => "vbc",
        }
    }

    /// Registry lookup. Total over the enum; specs are fixed at compile time.
    pub fn spec(self) -> AssignmentSpec {
        match self {
            Assignment::FtPopen => AssignmentSpec {
                assignment: self,
                artifact: "test_ft_popen",
                strategy: Strategy::Driver {
                    tester: "testers/ft_popen/test_ft_popen.c",
                },
            },
            Assignment::Picoshell => AssignmentSpec {
                assignment: self,
                artifact: "test_picoshell",
                strategy: Strategy::Driver {
                    tester: "testers/picoshell/test_picoshell.c",
                },
            },
            Assignment::Vbc => AssignmentSpec {
                assignment: self,
                artifact: "vbc",
                strategy: Strategy::CaseTable(VBC_CASES),
            },
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Assignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Assignment::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::UnknownAssignment(s.to_owned()))
    }
}

impl AssignmentSpec {
    /// Toolchain argument list for compiling `source` into this assignment's
    /// artifact. For driver assignments the reference driver source is
    /// appended to the same invocation, producing one combined executable.
    pub fn compile_argv(&self, root: &Path, source: &Path) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![
            "cc".into(),
            "-Wall".into(),
            "-Wextra".into(),
            source.as_os_str().to_owned(),
        ];
        if let Strategy::Driver { tester } = self.strategy {
            argv.push(root.join(tester).into_os_string());
        }
        argv.push("-o".into());
        argv.push(self.artifact.into());
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_roundtrips_every_assignment() {
        for a in Assignment::ALL {
            assert_eq!(a.name().parse::<Assignment>().unwrap(), a);
        }
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        let e = "get_next_line".parse::<Assignment>().unwrap_err();
        assert!(matches!(e, Error::UnknownAssignment(s) if s == "get_next_line"));
    }

    #[test]
    fn vbc_compiles_submission_only() {
        let argv = Assignment::Vbc
            .spec()
            .compile_argv(Path::new("/exam"), Path::new("/exam/rendu/vbc/vbc.c"));
        let argv: Vec<_> = argv.iter().map(|s| s.to_string_lossy().into_owned()).collect();
        assert_eq!(
            argv,
            ["cc", "-Wall", "-Wextra", "/exam/rendu/vbc/vbc.c", "-o", "vbc"]
        );
    }

    #[test]
    fn driver_assignments_append_the_tester_source() {
        let argv = Assignment::FtPopen
            .spec()
            .compile_argv(Path::new("/exam"), Path::new("/exam/rendu/ft_popen/ft_popen.c"));
        let argv: Vec<_> = argv.iter().map(|s| s.to_string_lossy().into_owned()).collect();
        assert_eq!(
            argv,
            [
                "cc",
                "-Wall",
                "-Wextra",
                "/exam/rendu/ft_popen/ft_popen.c",
                "/exam/testers/ft_popen/test_ft_popen.c",
                "-o",
                "test_ft_popen"
            ]
        );
    }
}
