//! The annotated token graph produced by the external parser.
//!
//! Tokens live in an arena indexed by [`TokenId`]; heads and children are
//! stored as ids, so identity comparisons never depend on token text. The
//! graph is immutable once built: every extraction stage reads it through
//! shared references.

mod builder;
mod display;

pub use builder::{SentenceGraphBuilder, TokenSpec};
pub use display::{ClausesDisplay, TreeDisplay, TreeTableDisplay};

use crate::vocabulary::DomainTag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, RangeInclusive};

/// Position of a token in its sentence; the identity key for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse part-of-speech categories the extraction stages distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosCategory {
    Noun,
    Pronoun,
    Determiner,
    Conjunction,
    Other,
}

/// Universal POS labels that collapse into [`PosCategory::Other`].
const OTHER_POS_LABELS: &[&str] = &[
    "other", "verb", "aux", "adp", "part", "adj", "adv", "propn", "num", "punct", "sconj",
    "intj", "sym", "x", "space",
];

impl PosCategory {
    /// Parse a universal POS label ("NOUN", "PRON", "CCONJ", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        match lower.as_str() {
            "noun" => Some(PosCategory::Noun),
            "pron" | "pronoun" => Some(PosCategory::Pronoun),
            "det" | "determiner" => Some(PosCategory::Determiner),
            "cconj" | "conj" | "conjunction" => Some(PosCategory::Conjunction),
            other if OTHER_POS_LABELS.contains(&other) => Some(PosCategory::Other),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PosCategory::Noun => "NOUN",
            PosCategory::Pronoun => "PRON",
            PosCategory::Determiner => "DET",
            PosCategory::Conjunction => "CCONJ",
            PosCategory::Other => "OTHER",
        }
    }
}

/// Dependency relation to the governing token.
///
/// Only the roles the stages inspect get their own variant; everything else is
/// kept verbatim and treated opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepRole {
    Root,
    Nsubj,
    Nsubjpass,
    Conj,
    Cc,
    Det,
    Other(String),
}

impl DepRole {
    pub fn parse(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "root" => DepRole::Root,
            "nsubj" => DepRole::Nsubj,
            "nsubjpass" => DepRole::Nsubjpass,
            "conj" => DepRole::Conj,
            "cc" => DepRole::Cc,
            "det" => DepRole::Det,
            _ => DepRole::Other(label.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DepRole::Root => "ROOT",
            DepRole::Nsubj => "nsubj",
            DepRole::Nsubjpass => "nsubjpass",
            DepRole::Conj => "conj",
            DepRole::Cc => "cc",
            DepRole::Det => "det",
            DepRole::Other(label) => label,
        }
    }
}

impl fmt::Display for DepRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token of a parsed sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    id: TokenId,
    text: String,
    pos: PosCategory,
    tag: Option<DomainTag>,
    dep: DepRole,
    head: TokenId,
    children: Vec<TokenId>,
}

impl AnnotatedToken {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pos(&self) -> PosCategory {
        self.pos
    }

    pub fn tag(&self) -> Option<DomainTag> {
        self.tag
    }

    pub fn dep(&self) -> &DepRole {
        &self.dep
    }

    /// The governing token; the sentence root is its own head.
    pub fn head(&self) -> TokenId {
        self.head
    }

    /// Dependents in sentence order.
    pub fn children(&self) -> &[TokenId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.head == self.id
    }
}

/// A contiguous noun phrase with its syntactic head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NounChunk {
    start: TokenId,
    end: TokenId,
    root: TokenId,
}

impl NounChunk {
    pub fn start(&self) -> TokenId {
        self.start
    }

    /// Inclusive end of the span.
    pub fn end(&self) -> TokenId {
        self.end
    }

    pub fn root(&self) -> TokenId {
        self.root
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.start.0..=self.end.0
    }

    pub fn tokens(&self) -> impl Iterator<Item = TokenId> {
        self.range().map(TokenId)
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.range().contains(&id.0)
    }
}

/// A single parsed sentence: token arena plus noun chunk segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceGraph {
    text: String,
    tokens: Vec<AnnotatedToken>,
    noun_chunks: Vec<NounChunk>,
}

impl SentenceGraph {
    pub fn builder<'v>(text: impl Into<String>) -> SentenceGraphBuilder<'v> {
        SentenceGraphBuilder::new(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[AnnotatedToken] {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> Option<&AnnotatedToken> {
        self.tokens.get(id.0)
    }

    pub fn noun_chunks(&self) -> &[NounChunk] {
        &self.noun_chunks
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The self-headed token, absent only for an empty sentence.
    pub fn root(&self) -> Option<TokenId> {
        self.tokens.iter().find(|t| t.is_root()).map(AnnotatedToken::id)
    }

    /// First child of `id` tagged as a coordinating conjunction.
    pub fn first_conjunction_child(&self, id: TokenId) -> Option<TokenId> {
        self[id]
            .children()
            .iter()
            .copied()
            .find(|&child| self[child].pos() == PosCategory::Conjunction)
    }
}

impl Index<TokenId> for SentenceGraph {
    type Output = AnnotatedToken;

    fn index(&self, id: TokenId) -> &AnnotatedToken {
        &self.tokens[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_labels() {
        assert_eq!(PosCategory::from_label("NOUN"), Some(PosCategory::Noun));
        assert_eq!(PosCategory::from_label("PRON"), Some(PosCategory::Pronoun));
        assert_eq!(PosCategory::from_label("det"), Some(PosCategory::Determiner));
        assert_eq!(PosCategory::from_label("CCONJ"), Some(PosCategory::Conjunction));
        assert_eq!(PosCategory::from_label("VERB"), Some(PosCategory::Other));
        assert_eq!(PosCategory::from_label("PROPN"), Some(PosCategory::Other));
        assert_eq!(PosCategory::from_label("banana"), None);
    }

    #[test]
    fn test_dep_roles_round_trip_labels() {
        assert_eq!(DepRole::parse("ROOT"), DepRole::Root);
        assert_eq!(DepRole::parse("nsubjpass"), DepRole::Nsubjpass);
        assert_eq!(DepRole::parse("conj"), DepRole::Conj);
        assert_eq!(DepRole::parse("pobj"), DepRole::Other("pobj".to_string()));
        assert_eq!(DepRole::parse("pobj").as_str(), "pobj");
        assert_eq!(DepRole::Root.to_string(), "ROOT");
    }

    #[test]
    fn test_noun_chunk_span() {
        let chunk = NounChunk {
            start: TokenId(2),
            end: TokenId(4),
            root: TokenId(4),
        };

        assert_eq!(chunk.tokens().collect::<Vec<_>>(), vec![TokenId(2), TokenId(3), TokenId(4)]);
        assert!(chunk.contains(TokenId(3)));
        assert!(!chunk.contains(TokenId(5)));
    }
}
