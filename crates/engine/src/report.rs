//! Report rendering and exit-code mapping.

use crate::types::Report;
use std::collections::HashMap;
use std::fmt::Write;

/// Caller-supplied remediation hints, keyed by check name.
pub type HintMap = HashMap<String, String>;

/// Render a report as human-readable text: per-outcome lines, a summary
/// block, the overall verdict, then remediation hints for failed checks
/// that have one.
pub fn render(report: &Report, hints: &HintMap) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let marker = if outcome.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "[{}] {}", marker, outcome.name);
        if let Some(ref detail) = outcome.failure_detail {
            let _ = writeln!(out, "       {}", detail);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "total: {}  passed: {}  failed: {}",
        report.outcomes.len(),
        report.passed_count,
        report.failed_count
    );
    let _ = writeln!(
        out,
        "env: os={} arch={} ({}ms)",
        report.env.os, report.env.arch, report.total_duration_ms
    );

    if report.all_passed {
        let _ = writeln!(out, "all checks passed");
    } else {
        let _ = writeln!(out, "{} check(s) failed", report.failed_count);

        let mut hinted = false;
        for outcome in report.failures() {
            if let Some(hint) = hints.get(&outcome.name) {
                if !hinted {
                    let _ = writeln!(out, "remediation:");
                    hinted = true;
                }
                let _ = writeln!(out, "  {}: {}", outcome.name, hint);
            }
        }
    }

    out
}

/// Map a report to a process exit code: 0 when everything passed, 1
/// otherwise. The harness is binary – there are no per-category codes.
pub fn exit_code(report: &Report) -> i32 {
    if report.all_passed {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, Report};

    fn report(outcomes: Vec<Outcome>) -> Report {
        Report::from_outcomes(outcomes, 7)
    }

    #[test]
    fn test_exit_code_binary() {
        assert_eq!(exit_code(&report(vec![])), 0);
        assert_eq!(exit_code(&report(vec![Outcome::passed("a", 0)])), 0);
        assert_eq!(
            exit_code(&report(vec![
                Outcome::passed("a", 0),
                Outcome::failed("b", "x", 0)
            ])),
            1
        );
    }

    #[test]
    fn test_render_all_passed() {
        let r = report(vec![Outcome::passed("config readable", 1)]);
        let text = render(&r, &HintMap::new());
        assert!(text.contains("[PASS] config readable"));
        assert!(text.contains("total: 1  passed: 1  failed: 0"));
        assert!(text.contains("all checks passed"));
        assert!(!text.contains("remediation"));
    }

    #[test]
    fn test_render_failure_shows_detail_and_verdict() {
        let r = report(vec![
            Outcome::passed("a", 0),
            Outcome::failed("deps", "dependency missing: flask", 0),
        ]);
        let text = render(&r, &HintMap::new());
        assert!(text.contains("[FAIL] deps"));
        assert!(text.contains("dependency missing: flask"));
        assert!(text.contains("1 check(s) failed"));
    }

    #[test]
    fn test_render_hints_only_for_failed_checks() {
        let mut hints = HintMap::new();
        hints.insert("deps".into(), "run ./install.sh".into());
        hints.insert("a".into(), "should not appear".into());

        let r = report(vec![
            Outcome::passed("a", 0),
            Outcome::failed("deps", "missing", 0),
        ]);
        let text = render(&r, &hints);
        assert!(text.contains("remediation:"));
        assert!(text.contains("deps: run ./install.sh"));
        assert!(!text.contains("should not appear"));
    }

    #[test]
    fn test_render_outcome_lines_keep_execution_order() {
        let r = report(vec![
            Outcome::failed("first", "x", 0),
            Outcome::passed("second", 0),
        ]);
        let text = render(&r, &HintMap::new());
        let first = text.find("[FAIL] first").expect("first line present");
        let second = text.find("[PASS] second").expect("second line present");
        assert!(first < second);
    }

    #[test]
    fn test_render_empty_report() {
        let text = render(&report(vec![]), &HintMap::new());
        assert!(text.contains("total: 0  passed: 0  failed: 0"));
        assert!(text.contains("all checks passed"));
    }
}
