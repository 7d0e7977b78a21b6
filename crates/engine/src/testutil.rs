//! Fake collaborators for engine tests.

use crate::context::ProbeContext;
use crate::traits::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct FakeFilesystem {
    present: Vec<PathBuf>,
}

impl FilesystemOps for FakeFilesystem {
    fn path_exists(&self, path: &Path) -> bool {
        self.present.iter().any(|p| p == path)
    }
}

pub struct FakeEnv {
    vars: HashMap<String, String>,
}

impl EnvOps for FakeEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// What the fake process collaborator does when `run` is called.
#[derive(Clone, Copy)]
pub enum FakeProcessBehaviour {
    Succeed,
    ExitNonZero,
    ExitNonZeroWithStdout(&'static str),
    MissingBinary,
    TimeOut,
}

pub struct FakeProcess {
    binaries: Vec<String>,
    behaviour: FakeProcessBehaviour,
}

impl ProcessOps for FakeProcess {
    fn binary_exists(&self, name: &str) -> bool {
        self.binaries.iter().any(|b| b == name)
    }

    fn run(&self, cmd: &str, _args: &[String], timeout: Duration) -> ProbeResult<ProcessOutput> {
        match self.behaviour {
            FakeProcessBehaviour::Succeed => Ok(ProcessOutput {
                success: true,
                stdout: String::new(),
            }),
            FakeProcessBehaviour::ExitNonZero => Ok(ProcessOutput {
                success: false,
                stdout: String::new(),
            }),
            FakeProcessBehaviour::ExitNonZeroWithStdout(s) => Ok(ProcessOutput {
                success: false,
                stdout: s.to_string(),
            }),
            FakeProcessBehaviour::MissingBinary => {
                Err(CheckError::DependencyMissing(format!("{} not found", cmd)))
            }
            FakeProcessBehaviour::TimeOut => Err(CheckError::Timeout(timeout)),
        }
    }
}

/// Build a context out of fakes: which paths exist, which env vars are set,
/// which binaries resolve, and how sub-processes behave.
pub fn fake_context(
    paths: Vec<&str>,
    vars: Vec<(&str, &str)>,
    binaries: Vec<&str>,
    behaviour: FakeProcessBehaviour,
) -> ProbeContext {
    ProbeContext::new(
        Box::new(FakeFilesystem {
            present: paths.into_iter().map(PathBuf::from).collect(),
        }),
        Box::new(FakeEnv {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }),
        Box::new(FakeProcess {
            binaries: binaries.into_iter().map(String::from).collect(),
            behaviour,
        }),
    )
}
