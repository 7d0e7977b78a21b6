use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Outcome – the stable per-check result contract
// ---------------------------------------------------------------------------

/// The structured result of executing one check once.
///
/// Created exactly once per execution by the check runner and never mutated
/// afterwards. `passed == true` implies `failure_detail` is `None`;
/// `passed == false` implies it is `Some`. Use the constructors below so the
/// invariant cannot be violated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<String>,
    pub duration_ms: u64,
}

impl Outcome {
    /// Build a passed outcome (no failure detail, by construction).
    pub fn passed(name: impl Into<String>, duration_ms: u64) -> Self {
        Outcome {
            name: name.into(),
            passed: true,
            failure_detail: None,
            duration_ms,
        }
    }

    /// Build a failed outcome carrying a descriptive detail.
    pub fn failed(name: impl Into<String>, detail: impl Into<String>, duration_ms: u64) -> Self {
        Outcome {
            name: name.into(),
            passed: false,
            failure_detail: Some(detail.into()),
            duration_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Report – aggregate of one full suite execution
// ---------------------------------------------------------------------------

/// Aggregated, derived summary of all outcomes from one suite run.
///
/// Computed once after every registered check has executed; there is no
/// partial report. `passed_count + failed_count == outcomes.len()` and
/// `all_passed == (failed_count == 0)` always hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub run_id: String,
    pub outcomes: Vec<Outcome>,
    pub passed_count: usize,
    pub failed_count: usize,
    pub all_passed: bool,
    pub total_duration_ms: u64,
    pub env: EnvSummary,
}

impl Report {
    /// Derive a report from the outcomes of one execution pass.
    pub fn from_outcomes(outcomes: Vec<Outcome>, total_duration_ms: u64) -> Self {
        let passed_count = outcomes.iter().filter(|o| o.passed).count();
        let failed_count = outcomes.len() - passed_count;
        Report {
            run_id: new_run_id(),
            outcomes,
            passed_count,
            failed_count,
            all_passed: failed_count == 0,
            total_duration_ms,
            env: EnvSummary::default(),
        }
    }

    /// Outcomes that did not pass, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvSummary {
    pub os: String,
    pub arch: String,
}

impl Default for EnvSummary {
    fn default() -> Self {
        Self {
            os: current_os().to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn current_os() -> &'static str {
    std::env::consts::OS
}

/// Generate a new run ID (UUIDv4).
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
