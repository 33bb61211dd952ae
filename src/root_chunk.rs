//! Noun chunk roots with pronoun referents resolved.
//!
//! Each noun chunk becomes a [`RootChunk`]: its root and members are replaced
//! by their referents (a passive subject points at its verb, a pronoun subject
//! at the last noun sibling) and determiners are dropped. Pronoun chunks whose
//! referent already lives in another chunk are not emitted twice.

use crate::sentence::{DepRole, PosCategory, SentenceGraph, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A chunk member: either a real token or the placeholder for a pronoun
/// whose referent could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Member {
    Token(TokenId),
    Unresolved { pronoun: TokenId },
}

impl Member {
    pub fn token(self) -> Option<TokenId> {
        match self {
            Member::Token(id) => Some(id),
            Member::Unresolved { .. } => None,
        }
    }

    pub fn is_unresolved(self) -> bool {
        matches!(self, Member::Unresolved { .. })
    }

    /// Surface text, `None` for a placeholder.
    pub fn text(self, graph: &SentenceGraph) -> Option<&str> {
        self.token().map(|id| graph[id].text())
    }

    /// Surface text with `?` standing in for a placeholder.
    pub fn display_text(self, graph: &SentenceGraph) -> &str {
        self.text(graph).unwrap_or("?")
    }
}

/// The working unit of the extraction stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootChunk {
    pub root: Member,
    pub members: Vec<Member>,
}

impl RootChunk {
    pub fn new(root: Member, members: Vec<Member>) -> Self {
        Self { root, members }
    }

    pub fn member_texts<'g>(&self, graph: &'g SentenceGraph) -> Vec<&'g str> {
        self.members.iter().map(|m| m.display_text(graph)).collect()
    }
}

/// Turns a sentence's noun chunks into [`RootChunk`]s.
#[derive(Debug, Clone, Default)]
pub struct ChunkRootResolver;

impl ChunkRootResolver {
    pub fn new() -> Self {
        Self
    }

    /// What `id` actually refers to.
    ///
    /// - passive subject: its head
    /// - pronoun subject: the last NOUN among its head's other children
    /// - anything else: itself
    pub fn resolved_referent(&self, graph: &SentenceGraph, id: TokenId) -> Member {
        let token = &graph[id];

        if *token.dep() == DepRole::Nsubjpass {
            return Member::Token(token.head());
        }

        if token.pos() == PosCategory::Pronoun && *token.dep() == DepRole::Nsubj {
            let referent = graph[token.head()]
                .children()
                .iter()
                .copied()
                .filter(|&child| child != id && graph[child].pos() == PosCategory::Noun)
                .last();
            return match referent {
                Some(noun) => Member::Token(noun),
                None => {
                    debug!(pronoun = %id, text = token.text(), "pronoun has no noun sibling");
                    Member::Unresolved { pronoun: id }
                }
            };
        }

        Member::Token(id)
    }

    pub fn resolve(&self, graph: &SentenceGraph) -> Vec<RootChunk> {
        let chunk_tokens: HashSet<TokenId> = graph
            .noun_chunks()
            .iter()
            .flat_map(|chunk| chunk.tokens())
            .collect();

        let resolved: Vec<RootChunk> = graph
            .noun_chunks()
            .iter()
            .filter_map(|chunk| {
                let root = self.resolved_referent(graph, chunk.root());

                let keep = match graph[chunk.root()].pos() {
                    PosCategory::Noun => true,
                    PosCategory::Pronoun => match root {
                        Member::Token(referent) => !chunk_tokens.contains(&referent),
                        Member::Unresolved { .. } => true,
                    },
                    _ => false,
                };
                if !keep {
                    debug!(root = %chunk.root(), "skipping chunk already covered elsewhere");
                    return None;
                }

                let members = chunk
                    .tokens()
                    .filter(|&t| graph[t].pos() != PosCategory::Determiner)
                    .map(|t| self.resolved_referent(graph, t))
                    .collect();

                Some(RootChunk::new(root, members))
            })
            .collect();

        debug!(
            chunks = graph.noun_chunks().len(),
            roots = resolved.len(),
            "resolved chunk roots"
        );
        resolved
    }
}
