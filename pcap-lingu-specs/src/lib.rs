//! Fixture-driven testing infrastructure for pcap-lingu.
//!
//! Test cases are `.toml` files holding one sentence as the external parser
//! annotated it (tokens, heads, dependency labels, noun chunks) together with
//! the clauses and negation count the pipeline should extract from it.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture types and conversion to a sentence graph
//! - [`parser`] - Parses fixture files
//! - [`loader`] - Loads one fixture or a whole directory tree
//! - [`runner`] - Runs fixtures and checks their expectations
//! - [`errors`] - Error types for the fixture system
//! - [`formatter`] - Failure and summary formatting
//! - [`failures`] - Expected failures tracking via TOML

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod parser;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{ChunkFixture, Expectation, SentenceFixture, TokenFixture};
pub use formatter::{format_broken, format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture, EXPECTED_FAILURES_FILE};
pub use parser::parse_fixture;
pub use runner::{
    check_expectations, format_clauses, run_all, run_fixture, FieldMismatch, FixtureOutcome,
    FixtureReport, HarnessRun,
};
