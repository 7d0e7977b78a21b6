//! Suite – ordered check registrations and sequential execution.

use crate::runner::{self, CheckFn, UnsupportedPolicy};
use crate::types::Report;
use std::io::Write;
use std::time::Instant;

struct RegisteredCheck {
    name: String,
    policy: UnsupportedPolicy,
    check: CheckFn,
}

/// The ordered collection of checks to run in one pass.
///
/// Registration order is both execution order and report order. Names need
/// not be unique; duplicates produce duplicate, independently-reported
/// outcomes. Execution is strictly sequential – later checks may depend on
/// side effects of earlier ones, so there is no parallel mode.
#[derive(Default)]
pub struct Suite {
    checks: Vec<RegisteredCheck>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check with the default (fail-on-unsupported) policy.
    pub fn register(&mut self, name: impl Into<String>, check: CheckFn) {
        self.register_with_policy(name, UnsupportedPolicy::Fail, check);
    }

    /// Append a check with an explicit unsupported-capability policy.
    pub fn register_with_policy(
        &mut self,
        name: impl Into<String>,
        policy: UnsupportedPolicy,
        check: CheckFn,
    ) {
        self.checks.push(RegisteredCheck {
            name: name.into(),
            policy,
            check,
        });
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Registered names, in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name.as_str()).collect()
    }

    /// Run every registered check in order and derive the report.
    pub fn run_all(&self) -> Report {
        self.run_all_with_progress(&mut std::io::sink())
    }

    /// Run every registered check in order, writing a cosmetic progress line
    /// per check to `progress`. Progress write failures are ignored – the
    /// lines are interactive visibility, not part of the outcome contract.
    pub fn run_all_with_progress(&self, progress: &mut dyn Write) -> Report {
        let start = Instant::now();
        let mut outcomes = Vec::with_capacity(self.checks.len());

        for registered in &self.checks {
            let outcome = runner::run(&registered.name, registered.policy, &registered.check);
            let marker = if outcome.passed { "ok" } else { "FAILED" };
            let _ = writeln!(progress, "check {} ... {}", registered.name, marker);
            outcomes.push(outcome);
        }

        let report = Report::from_outcomes(outcomes, start.elapsed().as_millis() as u64);
        tracing::info!(
            run_id = %report.run_id,
            total = report.outcomes.len(),
            failed = report.failed_count,
            "suite finished"
        );
        report
    }
}
