//! Expected failures tracking via TOML file.

use crate::errors::{SpecError, SpecResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Checks allowed to fail, read from `expected-failures.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Limitations of the extraction rules themselves.
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Failures with a fix under way.
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// One fixture check that may fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Which check fails: `negation_count`, `clauses`, `error` or `graph`.
    pub check: String,
    /// Printed next to the mismatch.
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

/// How a failed check is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    Known,
    Pending,
    /// Not listed; fails the run.
    Regression,
}

impl FailureState {
    pub fn label(self) -> &'static str {
        match self {
            FailureState::Known => "known",
            FailureState::Pending => "pending",
            FailureState::Regression => "regression",
        }
    }
}

impl ExpectedFailures {
    /// Load from a TOML file; a missing file means no expected failures.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let load_error = |message: String| SpecError::Load {
            path: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| load_error(e.to_string()))
    }

    /// The entry covering a failed check, known entries first.
    pub fn lookup(&self, fixture: &str, check: &str) -> Option<(FailureState, &FailureEntry)> {
        let known = self.known.iter().map(|e| (FailureState::Known, e));
        let pending = self.pending.iter().map(|e| (FailureState::Pending, e));
        known.chain(pending).find(|(_, e)| e.matches(fixture, check))
    }

    pub fn is_expected(&self, fixture: &str, check: &str) -> FailureState {
        self.lookup(fixture, check)
            .map_or(FailureState::Regression, |(state, _)| state)
    }

    /// Why a check is allowed to fail, if its entry says.
    pub fn reason(&self, fixture: &str, check: &str) -> Option<&str> {
        self.lookup(fixture, check)
            .and_then(|(_, e)| e.reason.as_deref())
    }

    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }
}

impl FailureEntry {
    fn matches(&self, fixture: &str, check: &str) -> bool {
        self.fixture == fixture && self.check == check
    }
}

/// Check totals across a fixture run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessResult {
    pub total: usize,
    pub passed: usize,
    /// Failed checks listed as known or pending.
    pub expected_failures: usize,
    pub regressions: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process exit status: 1 when any check regressed.
    pub fn exit_code(&self) -> i32 {
        if self.regressions > 0 {
            1
        } else {
            0
        }
    }

    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    pub fn failed(&self) -> usize {
        self.expected_failures + self.regressions
    }

    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => self.expected_failures += 1,
            FailureState::Regression => self.regressions += 1,
        }
    }
}
