//! Negation cue counting and stripping.
//!
//! A cue is an auxiliary "not", the contraction "n't", or a negative
//! preposition such as "without" heading a chunk. Cues are deduplicated by
//! token identity across the whole sentence; only the "not" style cues are
//! removed from chunk members. Polarity itself is left to later stages.

use crate::root_chunk::{Member, RootChunk};
use crate::sentence::{SentenceGraph, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

const DEFAULT_NOT_CUES: &[&str] = &["not", "n't"];
const DEFAULT_NEGATIVE_HEADS: &[&str] = &["without"];

/// Cleaned chunks plus the sentence-wide negation count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegationResult {
    pub chunks: Vec<RootChunk>,
    /// Number of distinct cue tokens; always `cues.len()`.
    pub negation_count: usize,
    /// Cue tokens in sentence order.
    pub cues: Vec<TokenId>,
}

/// Finds negation cues around each chunk and strips the "not" style ones.
#[derive(Debug, Clone)]
pub struct NegationExtractor {
    not_cues: Vec<String>,
    negative_heads: Vec<String>,
}

impl NegationExtractor {
    pub fn new() -> Self {
        Self::with_cues(DEFAULT_NOT_CUES, DEFAULT_NEGATIVE_HEADS)
    }

    pub fn with_cues<S: AsRef<str>>(not_cues: &[S], negative_heads: &[S]) -> Self {
        Self {
            not_cues: not_cues.iter().map(|s| s.as_ref().to_lowercase()).collect(),
            negative_heads: negative_heads.iter().map(|s| s.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn is_not_cue(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.not_cues.iter().any(|cue| *cue == lower)
    }

    pub fn is_negative_head(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.negative_heads.iter().any(|cue| *cue == lower)
    }

    fn is_not_member(&self, graph: &SentenceGraph, member: Member) -> bool {
        member.text(graph).map_or(false, |text| self.is_not_cue(text))
    }

    /// Cues visible from one chunk: "not" children of the root's head (when
    /// the root is not the sentence root), "not" members, and a negative head.
    pub fn chunk_cues(&self, graph: &SentenceGraph, chunk: &RootChunk) -> BTreeSet<TokenId> {
        let mut cues = BTreeSet::new();

        if let Member::Token(root) = chunk.root {
            let head = graph[root].head();
            if head != root {
                cues.extend(
                    graph[head]
                        .children()
                        .iter()
                        .copied()
                        .filter(|&child| self.is_not_cue(graph[child].text())),
                );
            }
            if self.is_negative_head(graph[head].text()) {
                cues.insert(head);
            }
        }

        cues.extend(
            chunk
                .members
                .iter()
                .filter(|&&m| self.is_not_member(graph, m))
                .filter_map(|m| m.token()),
        );

        cues
    }

    pub fn extract(&self, graph: &SentenceGraph, chunks: &[RootChunk]) -> NegationResult {
        let cues: BTreeSet<TokenId> = chunks
            .iter()
            .flat_map(|chunk| self.chunk_cues(graph, chunk))
            .collect();

        let cleaned = chunks
            .iter()
            .map(|chunk| {
                RootChunk::new(
                    chunk.root,
                    chunk
                        .members
                        .iter()
                        .copied()
                        .filter(|&m| !self.is_not_member(graph, m))
                        .collect(),
                )
            })
            .collect();

        debug!(cues = cues.len(), "counted negation cues");
        NegationResult {
            chunks: cleaned,
            negation_count: cues.len(),
            cues: cues.into_iter().collect(),
        }
    }
}

impl Default for NegationExtractor {
    fn default() -> Self {
        Self::new()
    }
}
