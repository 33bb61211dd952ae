//! Core types for `.toml` sentence fixtures.
//!
//! A fixture carries one sentence as the external parser would have
//! annotated it, plus what the pipeline is expected to extract:
//!
//! ```toml
//! title = "Negative preposition"
//! sentence = "ip4 without port 80"
//!
//! tokens = [
//!     { text = "ip4", pos = "NOUN", dep = "ROOT", head = 0 },
//!     { text = "without", pos = "ADP", dep = "prep", head = 0 },
//!     { text = "port", pos = "NOUN", dep = "compound", head = 3 },
//!     { text = "80", pos = "NUM", dep = "pobj", head = 1 },
//! ]
//! chunks = [
//!     { start = 0, end = 0, root = 0 },
//!     { start = 2, end = 3, root = 3 },
//! ]
//!
//! [expect]
//! negation_count = 1
//! clauses = [["ip4"], ["port", "80"]]
//! ```

use crate::errors::{SpecError, SpecResult};
use pcap_lingu::{DepRole, PosCategory, SentenceGraph, Vocabulary};
use serde::{Deserialize, Serialize};

/// A parsed sentence fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentenceFixture {
    /// Optional human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// The raw sentence text
    pub sentence: String,
    /// Tokens in sentence order
    #[serde(default)]
    pub tokens: Vec<TokenFixture>,
    /// Noun chunks in sentence order
    #[serde(default)]
    pub chunks: Vec<ChunkFixture>,
    /// Expected pipeline output
    #[serde(default)]
    pub expect: Expectation,
}

/// One token of the annotated parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenFixture {
    pub text: String,
    /// Universal POS label (`NOUN`, `PRON`, `DET`, `CCONJ`, `VERB`, ...)
    pub pos: String,
    /// Dependency label (`ROOT`, `nsubj`, `conj`, `cc`, ...)
    pub dep: String,
    /// Index of the governing token; the root points at itself
    pub head: usize,
}

/// A noun chunk over an inclusive token range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkFixture {
    pub start: usize,
    pub end: usize,
    pub root: usize,
}

/// What a fixture expects; absent fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Expectation {
    pub negation_count: Option<usize>,
    /// Member texts per clause, `"?"` for an unresolved pronoun
    pub clauses: Option<Vec<Vec<String>>>,
    /// Substring of the expected pipeline error
    pub error: Option<String>,
}

impl Expectation {
    /// Number of checks this expectation makes.
    pub fn check_count(&self) -> usize {
        [
            self.negation_count.is_some(),
            self.clauses.is_some(),
            self.error.is_some(),
        ]
        .iter()
        .filter(|&&set| set)
        .count()
    }
}

impl SentenceFixture {
    /// Build the sentence graph, with vocabulary overrides applied.
    pub fn to_graph(&self, vocabulary: &Vocabulary) -> SpecResult<SentenceGraph> {
        let mut builder = SentenceGraph::builder(self.sentence.as_str()).annotate_with(vocabulary);

        for (i, token) in self.tokens.iter().enumerate() {
            let pos = PosCategory::from_label(&token.pos).ok_or_else(|| SpecError::UnknownPos {
                token: i,
                label: token.pos.clone(),
            })?;
            builder = builder.token(token.text.as_str(), pos, DepRole::parse(&token.dep), token.head);
        }
        for chunk in &self.chunks {
            builder = builder.noun_chunk(chunk.start, chunk.end, chunk.root);
        }

        Ok(builder.build()?)
    }

    /// Title if present, otherwise the sentence itself.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.sentence)
    }
}
