//! Pre-flight verification engine.
//!
//! Runs an ordered sequence of independent, named checks against the local
//! environment before a larger application starts. The engine owns
//! registration, isolated execution (one broken check cannot abort the
//! rest), outcome aggregation, report rendering, and exit-code mapping.
//! What to check is caller configuration – see [`manifest`].

pub mod context;
pub mod manifest;
pub mod platform;
pub mod report;
pub mod runner;
pub mod suite;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports for convenience
pub use context::ProbeContext;
pub use report::{exit_code, render, HintMap};
pub use runner::{CheckFn, UnsupportedPolicy};
pub use suite::Suite;
pub use traits::CheckError;
pub use types::{Outcome, Report};
