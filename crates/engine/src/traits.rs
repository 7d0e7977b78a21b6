use std::path::Path;
use std::time::Duration;

/// Result type for check and collaborator operations.
pub type ProbeResult<T> = Result<T, CheckError>;

/// Why a check could not determine its condition.
///
/// A check that runs to completion and finds its condition unmet returns
/// `Ok(false)`; it returns one of these only when the question itself could
/// not be answered (missing collaborator, denied access, timeout).
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("unsupported on this platform: {0}")]
    Unsupported(String),

    #[error("dependency missing: {0}")]
    DependencyMissing(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// Collaborator capabilities consumed by checks
// ---------------------------------------------------------------------------
//
// The engine holds no global state: everything a check queries about the
// host lives behind these traits, so tests substitute fakes.

pub trait FilesystemOps: Send + Sync {
    fn path_exists(&self, path: &Path) -> bool;
}

pub trait EnvOps: Send + Sync {
    /// Value of an environment variable, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Output of a completed (non-timed-out) sub-process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub success: bool,
    /// First 4 KiB of stdout, lossily decoded.
    pub stdout: String,
}

pub trait ProcessOps: Send + Sync {
    /// Whether a named binary is resolvable on PATH.
    fn binary_exists(&self, name: &str) -> bool;

    /// Run a sub-process and wait for it, bounded by `timeout`.
    ///
    /// A process still running at the deadline is killed and surfaces as
    /// [`CheckError::Timeout`]; a missing binary surfaces as
    /// [`CheckError::DependencyMissing`].
    fn run(&self, cmd: &str, args: &[String], timeout: Duration) -> ProbeResult<ProcessOutput>;
}
