//! Parser for `.toml` sentence fixtures.

use crate::errors::{SpecError, SpecResult};
use crate::fixture::SentenceFixture;

/// Parse a fixture from TOML text.
pub fn parse_fixture(content: &str) -> SpecResult<SentenceFixture> {
    toml::from_str(content).map_err(|e| SpecError::Parse {
        line: e.span().map_or(0, |span| count_lines(content, span.start)),
        message: e.message().to_string(),
    })
}

/// 1-based line number of a byte offset.
fn count_lines(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .map_or(0, |before| before.matches('\n').count())
        + 1
}
