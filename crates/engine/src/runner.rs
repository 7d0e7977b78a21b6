//! Check runner – the containment boundary.
//!
//! Every check invocation goes through [`run`], which converts whatever the
//! check does – return a boolean, return a [`CheckError`], or panic – into a
//! well-formed [`Outcome`]. Nothing propagates out of `run`, so one broken
//! check can never abort its siblings.

use crate::traits::CheckError;
use crate::types::Outcome;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

/// Signature for all checks. Built and owned by the caller; the engine only
/// ever invokes them.
pub type CheckFn = Box<dyn Fn() -> Result<bool, CheckError> + Send + Sync>;

/// Detail recorded when a check returns `Ok(false)` without further
/// explanation.
pub const GENERIC_FAILURE_DETAIL: &str = "check reported failure";

/// How to treat a check that reports its capability does not exist on this
/// platform. Registration data, not engine special-casing: the engine only
/// ever compares the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// `CheckError::Unsupported` is a failure like any other.
    #[default]
    Fail,
    /// `CheckError::Unsupported` is recorded as a pass – the capability
    /// legitimately does not exist here.
    Tolerate,
}

/// Execute one check and return its outcome. Never propagates a failure.
pub fn run(name: &str, policy: UnsupportedPolicy, check: &CheckFn) -> Outcome {
    let start = Instant::now();
    let result = catch_unwind(AssertUnwindSafe(|| check()));
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(true)) => {
            tracing::debug!(check = name, "check passed");
            Outcome::passed(name, duration_ms)
        }
        Ok(Ok(false)) => {
            tracing::debug!(check = name, "check reported failure");
            Outcome::failed(name, GENERIC_FAILURE_DETAIL, duration_ms)
        }
        Ok(Err(CheckError::Unsupported(reason))) if policy == UnsupportedPolicy::Tolerate => {
            tracing::debug!(check = name, %reason, "unsupported capability tolerated");
            Outcome::passed(name, duration_ms)
        }
        Ok(Err(e)) => {
            tracing::debug!(check = name, error = %e, "check errored");
            Outcome::failed(name, e.to_string(), duration_ms)
        }
        Err(payload) => {
            let detail = format!("check panicked: {}", panic_payload_to_string(payload.as_ref()));
            tracing::warn!(check = name, %detail, "contained a panic");
            Outcome::failed(name, detail, duration_ms)
        }
    }
}

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_result_passes() {
        let check: CheckFn = Box::new(|| Ok(true));
        let o = run("ok", UnsupportedPolicy::Fail, &check);
        assert!(o.passed);
        assert!(o.failure_detail.is_none());
        assert_eq!(o.name, "ok");
    }

    #[test]
    fn test_false_result_gets_generic_detail() {
        let check: CheckFn = Box::new(|| Ok(false));
        let o = run("unmet", UnsupportedPolicy::Fail, &check);
        assert!(!o.passed);
        assert_eq!(o.failure_detail.as_deref(), Some(GENERIC_FAILURE_DETAIL));
    }

    #[test]
    fn test_error_result_carries_description() {
        let check: CheckFn =
            Box::new(|| Err(CheckError::DependencyMissing("flask not importable".into())));
        let o = run("deps", UnsupportedPolicy::Fail, &check);
        assert!(!o.passed);
        let detail = o.failure_detail.expect("failed outcome carries detail");
        assert!(detail.contains("dependency missing"));
        assert!(detail.contains("flask not importable"));
    }

    #[test]
    fn test_panic_is_contained() {
        let check: CheckFn = Box::new(|| panic!("boom"));
        let o = run("explodes", UnsupportedPolicy::Fail, &check);
        assert!(!o.passed);
        let detail = o.failure_detail.expect("panic recorded as detail");
        assert!(detail.contains("boom"));
    }

    #[test]
    fn test_unsupported_tolerated_by_policy() {
        let check: CheckFn = Box::new(|| Err(CheckError::Unsupported("no window server".into())));
        let o = run("gui", UnsupportedPolicy::Tolerate, &check);
        assert!(o.passed);
        assert!(o.failure_detail.is_none());
    }

    #[test]
    fn test_unsupported_fails_by_default() {
        let check: CheckFn = Box::new(|| Err(CheckError::Unsupported("no window server".into())));
        let o = run("gui", UnsupportedPolicy::Fail, &check);
        assert!(!o.passed);
    }

    #[test]
    fn test_tolerate_only_covers_unsupported() {
        let check: CheckFn = Box::new(|| Err(CheckError::Timeout(std::time::Duration::from_secs(1))));
        let o = run("slow", UnsupportedPolicy::Tolerate, &check);
        assert!(!o.passed);
    }
}
