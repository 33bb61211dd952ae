//! Rich error formatting for fixture failures.

use crate::errors::SpecError;
use crate::failures::{ExpectedFailures, FailureState};
use crate::fixture::SentenceFixture;
use crate::runner::{FieldMismatch, FixtureOutcome};
use std::fmt::Write;

/// Format a failed fixture with the sentence and each mismatched field.
/// Listed failures carry the reason from their expected-failures entry.
pub fn format_failure(
    fixture_name: &str,
    fixture: &SentenceFixture,
    outcome: &FixtureOutcome,
    states: &[FailureState],
    expected: &ExpectedFailures,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "\nFAIL: {} ({})", fixture_name, fixture.label());
    let _ = writeln!(output);
    let _ = writeln!(output, "  {}", fixture.sentence);
    let _ = writeln!(output);

    for (i, mismatch) in outcome.mismatches.iter().enumerate() {
        let state = states.get(i).copied().unwrap_or(FailureState::Regression);
        let _ = writeln!(
            output,
            "  {} {}: expected `{}`, found `{}` [{}]",
            marker(state),
            mismatch.field,
            mismatch.expected,
            mismatch.actual,
            state.label()
        );
        if let Some(reason) = expected.reason(fixture_name, mismatch.field) {
            let _ = writeln!(output, "      reason: {}", reason);
        }
    }

    if !outcome.diagnostics.is_empty() {
        let _ = writeln!(output);
        for diagnostic in &outcome.diagnostics {
            let _ = writeln!(output, "  note: {:?}", diagnostic);
        }
    }

    if let Some(hint) = outcome.mismatches.iter().find_map(|m| generate_hint(m, outcome)) {
        let _ = writeln!(output);
        let _ = writeln!(output, "  hint: {}", hint);
    }

    output
}

/// Format a fixture that could not be turned into a sentence graph.
pub fn format_broken(fixture_name: &str, error: &SpecError, state: FailureState) -> String {
    format!(
        "\nFAIL: {}\n\n  {} fixture could not be built: {} [{}]\n",
        fixture_name,
        marker(state),
        error,
        state.label()
    )
}

/// Format a summary of all results.
pub fn format_summary(
    label: &str,
    passed: usize,
    failed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let status = if regressions > 0 { "FAIL" } else { "PASS" };
    format!(
        "\n{}: {}\n  {} passed, {} failed ({} expected, {} regressions)\n",
        status, label, passed, failed, expected_failures, regressions
    )
}

fn marker(state: FailureState) -> &'static str {
    match state {
        FailureState::Regression => "\u{2717}",
        FailureState::Known | FailureState::Pending => "~",
    }
}

fn generate_hint(mismatch: &FieldMismatch, outcome: &FixtureOutcome) -> Option<String> {
    match mismatch.field {
        "clauses" if mismatch.actual.contains('?') => Some(
            "a pronoun subject had no noun sibling - check the head's children in the parse"
                .to_string(),
        ),
        "clauses" if mismatch.expected.matches('[').count() > mismatch.actual.matches('[').count() => {
            Some("fewer clauses than expected - only a plain \"and\" splits a chunk".to_string())
        }
        "negation_count" if outcome.sentence.split_whitespace().any(|w| w == "without") => Some(
            "a negative preposition only counts when it governs a chunk root".to_string(),
        ),
        "error" if outcome.error.is_some() => Some(
            "every conjunct chunk needs a chunk rooted at its head".to_string(),
        ),
        _ => None,
    }
}
