//! Suite manifest – caller-supplied check declarations in YAML.
//!
//! The engine does not know what to check; the manifest does. Each entry
//! names one probe of the local environment (a file, an environment
//! variable, a binary on PATH, or a sub-process) plus optional remediation
//! hints and platform policy. `build_suite` lowers the declarations into
//! engine checks over a shared [`ProbeContext`].

use crate::context::ProbeContext;
use crate::report::HintMap;
use crate::runner::UnsupportedPolicy;
use crate::suite::Suite;
use crate::traits::CheckError;
use crate::types::current_os;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read manifest {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

#[derive(Debug, Deserialize)]
pub struct CheckSpec {
    /// Display name; derived from the kind when omitted.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: CheckKind,
    /// Remediation hint shown when this check fails.
    #[serde(default)]
    pub hint: Option<String>,
    /// Operating systems where this capability legitimately may not exist;
    /// on those, absence is recorded as a pass instead of a failure.
    #[serde(default)]
    pub optional_on: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckKind {
    /// A path that must exist.
    File { path: PathBuf },
    /// An environment variable that must be set (optionally to a value).
    Env {
        var: String,
        #[serde(default)]
        equals: Option<String>,
    },
    /// A binary that must be resolvable on PATH.
    Binary { bin: String },
    /// A sub-process that must exit successfully within the timeout.
    Command {
        cmd: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl CheckSpec {
    /// The name this check is registered and reported under.
    pub fn display_name(&self) -> String {
        if let Some(ref name) = self.name {
            return name.clone();
        }
        match &self.kind {
            CheckKind::File { path } => format!("file {}", path.display()),
            CheckKind::Env { var, .. } => format!("env {}", var),
            CheckKind::Binary { bin } => format!("binary {}", bin),
            CheckKind::Command { cmd, .. } => format!("command {}", cmd),
        }
    }

    fn policy(&self) -> UnsupportedPolicy {
        if self.optional_on.iter().any(|os| os == current_os()) {
            UnsupportedPolicy::Tolerate
        } else {
            UnsupportedPolicy::Fail
        }
    }
}

/// Parse a manifest from a YAML string.
pub fn load_manifest(yaml: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Read and parse a manifest file.
pub fn load_manifest_file(path: &Path) -> Result<Manifest, ManifestError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_manifest(&yaml)
}

/// Lower a manifest into a runnable suite plus its remediation hints.
pub fn build_suite(manifest: &Manifest, ctx: Arc<ProbeContext>) -> (Suite, HintMap) {
    let mut suite = Suite::new();
    let mut hints = HintMap::new();

    for spec in &manifest.checks {
        let name = spec.display_name();
        let policy = spec.policy();
        // On the listed platforms a missing binary/command is "unsupported",
        // not "broken", so the Tolerate policy can record it as a pass.
        let platform_optional = policy == UnsupportedPolicy::Tolerate;

        if let Some(ref hint) = spec.hint {
            hints.insert(name.clone(), hint.clone());
        }

        let check: crate::runner::CheckFn = match &spec.kind {
            CheckKind::File { path } => {
                let ctx = Arc::clone(&ctx);
                let path = path.clone();
                Box::new(move || Ok(ctx.fs().path_exists(&path)))
            }
            CheckKind::Env { var, equals } => {
                let ctx = Arc::clone(&ctx);
                let var = var.clone();
                let equals = equals.clone();
                Box::new(move || match (ctx.env().var(&var), &equals) {
                    (None, _) => Ok(false),
                    (Some(_), None) => Ok(true),
                    (Some(actual), Some(expected)) => Ok(&actual == expected),
                })
            }
            CheckKind::Binary { bin } => {
                let ctx = Arc::clone(&ctx);
                let bin = bin.clone();
                Box::new(move || {
                    if ctx.process().binary_exists(&bin) {
                        Ok(true)
                    } else if platform_optional {
                        Err(CheckError::Unsupported(format!(
                            "{} not present on {}",
                            bin,
                            current_os()
                        )))
                    } else {
                        Err(CheckError::DependencyMissing(format!(
                            "{} not found on PATH",
                            bin
                        )))
                    }
                })
            }
            CheckKind::Command {
                cmd,
                args,
                timeout_ms,
            } => {
                let ctx = Arc::clone(&ctx);
                let cmd = cmd.clone();
                let args = args.clone();
                let timeout = Duration::from_millis(*timeout_ms);
                Box::new(move || {
                    let output = ctx.process().run(&cmd, &args, timeout).map_err(|e| match e {
                        CheckError::DependencyMissing(m) if platform_optional => {
                            CheckError::Unsupported(m)
                        }
                        other => other,
                    })?;
                    if output.success {
                        Ok(true)
                    } else if output.stdout.is_empty() {
                        Err(CheckError::Other(format!("{} exited unsuccessfully", cmd)))
                    } else {
                        Err(CheckError::Other(format!(
                            "{} exited unsuccessfully: {}",
                            cmd, output.stdout
                        )))
                    }
                })
            }
        };

        suite.register_with_policy(name, policy, check);
    }

    (suite, hints)
}
