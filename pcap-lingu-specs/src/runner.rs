//! Fixture runner: builds each fixture's graph, runs the extraction pipeline
//! and checks the fixture's expectations against what came out.

use crate::errors::SpecResult;
use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::{Expectation, SentenceFixture};
use pcap_lingu::{Diagnostic, Pipeline, SentenceAnalysis, SentenceGraph};
use serde::Serialize;
use std::fmt;
use tracing::{debug, debug_span, warn};

/// Check name for a fixture whose graph could not be built.
pub const GRAPH_CHECK: &str = "graph";

/// A single expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    /// `negation_count`, `clauses` or `error`.
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl FieldMismatch {
    pub fn new(field: &'static str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\u{2717} {}: expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// What the pipeline made of one fixture.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureOutcome {
    pub sentence: String,
    /// Member texts per clause, `"?"` for a placeholder.
    pub clauses: Vec<Vec<String>>,
    pub negation_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Pipeline error message, if the sentence failed.
    pub error: Option<String>,
    pub mismatches: Vec<FieldMismatch>,
    #[serde(skip)]
    pub graph: SentenceGraph,
    #[serde(skip)]
    pub analysis: Option<SentenceAnalysis>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Render clause texts as `[[ip4], [port, 80]]`.
pub fn format_clauses(clauses: &[Vec<String>]) -> String {
    let inner: Vec<String> = clauses
        .iter()
        .map(|clause| format!("[{}]", clause.join(", ")))
        .collect();
    format!("[{}]", inner.join(", "))
}

/// Run one fixture through the pipeline.
///
/// A fixture whose parse is not a valid graph is an error; a pipeline
/// failure is part of the outcome and checked like any other result.
pub fn run_fixture(fixture: &SentenceFixture, pipeline: &Pipeline) -> SpecResult<FixtureOutcome> {
    let graph = fixture.to_graph(pipeline.vocabulary())?;

    let mut outcome = match pipeline.analyze(&graph) {
        Ok(analysis) => FixtureOutcome {
            sentence: fixture.sentence.clone(),
            clauses: analysis
                .clause_texts(&graph)
                .into_iter()
                .map(|clause| clause.into_iter().map(str::to_string).collect())
                .collect(),
            negation_count: analysis.negation_count,
            diagnostics: analysis.diagnostics.clone(),
            error: None,
            mismatches: Vec::new(),
            analysis: Some(analysis),
            graph,
        },
        Err(e) => FixtureOutcome {
            sentence: fixture.sentence.clone(),
            clauses: Vec::new(),
            negation_count: 0,
            diagnostics: Vec::new(),
            error: Some(e.to_string()),
            mismatches: Vec::new(),
            analysis: None,
            graph,
        },
    };

    outcome.mismatches = check_expectations(&fixture.expect, &outcome);
    Ok(outcome)
}

/// Compare an outcome with what the fixture expects.
///
/// Output checks are skipped for a sentence that failed; the `error` check
/// reports the failure instead.
pub fn check_expectations(expect: &Expectation, outcome: &FixtureOutcome) -> Vec<FieldMismatch> {
    let mut mismatches = Vec::new();

    match (&expect.error, &outcome.error) {
        (Some(expected), Some(actual)) if !actual.contains(expected.as_str()) => {
            mismatches.push(FieldMismatch::new("error", expected.clone(), actual.clone()));
        }
        (Some(expected), None) => {
            mismatches.push(FieldMismatch::new("error", expected.clone(), "no error"));
        }
        (None, Some(actual)) => {
            mismatches.push(FieldMismatch::new("error", "no error", actual.clone()));
        }
        _ => {}
    }
    if outcome.error.is_some() {
        return mismatches;
    }

    if let Some(expected) = expect.negation_count {
        if expected != outcome.negation_count {
            mismatches.push(FieldMismatch::new(
                "negation_count",
                expected.to_string(),
                outcome.negation_count.to_string(),
            ));
        }
    }

    if let Some(expected) = &expect.clauses {
        if *expected != outcome.clauses {
            mismatches.push(FieldMismatch::new(
                "clauses",
                format_clauses(expected),
                format_clauses(&outcome.clauses),
            ));
        }
    }

    mismatches
}

/// One fixture's result in a harness run.
#[derive(Debug)]
pub struct FixtureReport {
    pub name: String,
    pub outcome: SpecResult<FixtureOutcome>,
    /// Failure state per mismatch, or a single entry for a broken fixture.
    pub states: Vec<FailureState>,
}

impl FixtureReport {
    pub fn has_regression(&self) -> bool {
        self.states.contains(&FailureState::Regression)
    }
}

/// Every fixture's report plus the totals.
#[derive(Debug)]
pub struct HarnessRun {
    pub reports: Vec<FixtureReport>,
    pub result: HarnessResult,
}

/// Run every fixture independently, classifying failures against the
/// expected-failures list.
pub fn run_all(
    fixtures: &[(String, SentenceFixture)],
    pipeline: &Pipeline,
    expected: &ExpectedFailures,
) -> HarnessRun {
    let mut result = HarnessResult::new();
    let mut reports = Vec::with_capacity(fixtures.len());

    for (name, fixture) in fixtures {
        let _span = debug_span!("fixture", name = name.as_str()).entered();
        let outcome = run_fixture(fixture, pipeline);
        let mut states = Vec::new();

        match &outcome {
            Ok(outcome) => {
                // Output checks never ran when the pipeline failed unexpectedly.
                let unexpected_error = outcome.error.is_some() && fixture.expect.error.is_none();
                let passes = if unexpected_error {
                    0
                } else {
                    fixture.expect.check_count().max(1).saturating_sub(outcome.mismatches.len())
                };
                for _ in 0..passes {
                    result.record_pass();
                }
                for mismatch in &outcome.mismatches {
                    let state = expected.is_expected(name, mismatch.field);
                    if state == FailureState::Regression {
                        warn!(field = mismatch.field, "fixture regressed");
                    }
                    result.record_failure(state);
                    states.push(state);
                }
            }
            Err(e) => {
                let state = expected.is_expected(name, GRAPH_CHECK);
                warn!(error = %e, "fixture could not be built");
                result.record_failure(state);
                states.push(state);
            }
        }

        debug!(failures = states.len(), "ran fixture");
        reports.push(FixtureReport {
            name: name.clone(),
            outcome,
            states,
        });
    }

    HarnessRun { reports, result }
}
