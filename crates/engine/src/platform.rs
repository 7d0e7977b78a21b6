//! Platform implementations of the collaborator traits.
//!
//! - [`StdFilesystem`]: real std::fs queries
//! - [`StdEnv`]: real process environment
//! - [`SystemProcess`]: PATH lookup and bounded sub-process execution

use crate::traits::*;
use std::io::Read;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const STDOUT_SNIPPET_BYTES: usize = 4096;

// ===========================================================================
// Filesystem – wraps std::fs
// ===========================================================================

pub struct StdFilesystem;

impl FilesystemOps for StdFilesystem {
    fn path_exists(&self, path: &std::path::Path) -> bool {
        path.exists()
    }
}

// ===========================================================================
// Environment – wraps std::env
// ===========================================================================

pub struct StdEnv;

impl EnvOps for StdEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

// ===========================================================================
// Processes – PATH search and bounded execution
// ===========================================================================

pub struct SystemProcess;

impl ProcessOps for SystemProcess {
    fn binary_exists(&self, name: &str) -> bool {
        resolve_on_path(name).is_some()
    }

    fn run(&self, cmd: &str, args: &[String], timeout: Duration) -> ProbeResult<ProcessOutput> {
        let mut child = std::process::Command::new(cmd)
            .args(args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    CheckError::DependencyMissing(format!("{} not found", cmd))
                }
                std::io::ErrorKind::PermissionDenied => {
                    CheckError::PermissionDenied(format!("cannot execute {}: {}", cmd, e))
                }
                _ => CheckError::Io(e),
            })?;

        // Drain stdout on a separate thread while polling for exit: a child
        // writing more than the OS pipe buffer would otherwise block on the
        // full pipe until the deadline and be misreported as a timeout.
        let reader = child.stdout.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut snippet = Vec::new();
                let _ = pipe
                    .by_ref()
                    .take(STDOUT_SNIPPET_BYTES as u64)
                    .read_to_end(&mut snippet);
                let _ = std::io::copy(&mut pipe, &mut std::io::sink());
                snippet
            })
        });

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CheckError::Timeout(timeout));
                }
                None => std::thread::sleep(Duration::from_millis(25)),
            }
        };

        let stdout = match reader {
            Some(handle) => match handle.join() {
                Ok(buf) => String::from_utf8_lossy(&buf).trim().to_string(),
                Err(_) => String::new(),
            },
            None => String::new(),
        };

        Ok(ProcessOutput {
            success: status.success(),
            stdout,
        })
    }
}

/// Resolve a binary name against PATH, mirroring what the shell would find.
fn resolve_on_path(name: &str) -> Option<PathBuf> {
    // An explicit path bypasses the PATH search
    if name.contains(std::path::MAIN_SEPARATOR) {
        let p = PathBuf::from(name);
        return p.is_file().then_some(p);
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{}.exe", name));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}
