//! Probe context – holds collaborator trait objects for checks.

use crate::platform::{StdEnv, StdFilesystem, SystemProcess};
use crate::traits::*;

/// Bundle of host collaborators handed to caller-built checks.
///
/// Holds trait objects so callers (and tests) can swap implementations;
/// the engine itself never touches the host directly.
pub struct ProbeContext {
    fs: Box<dyn FilesystemOps>,
    env: Box<dyn EnvOps>,
    process: Box<dyn ProcessOps>,
}

impl ProbeContext {
    pub fn new(
        fs: Box<dyn FilesystemOps>,
        env: Box<dyn EnvOps>,
        process: Box<dyn ProcessOps>,
    ) -> Self {
        Self { fs, env, process }
    }

    /// Context backed by the real host: std::fs, std::env, std::process.
    pub fn default_platform() -> Self {
        Self {
            fs: Box::new(StdFilesystem),
            env: Box::new(StdEnv),
            process: Box::new(SystemProcess),
        }
    }

    pub fn fs(&self) -> &dyn FilesystemOps {
        self.fs.as_ref()
    }

    pub fn env(&self) -> &dyn EnvOps {
        self.env.as_ref()
    }

    pub fn process(&self) -> &dyn ProcessOps {
        self.process.as_ref()
    }
}
