use super::{AnnotatedToken, DepRole, NounChunk, PosCategory, SentenceGraph, TokenId};
use crate::errors::GraphError;
use crate::vocabulary::{DomainTag, Vocabulary};

/// Parser output for one token, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpec {
    pub text: String,
    pub pos: PosCategory,
    pub dep: DepRole,
    /// Index of the governing token; equal to the token's own index for the root.
    pub head: usize,
    pub tag: Option<DomainTag>,
}

impl TokenSpec {
    pub fn new(text: impl Into<String>, pos: PosCategory, dep: DepRole, head: usize) -> Self {
        Self {
            text: text.into(),
            pos,
            dep,
            head,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: DomainTag) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// Assembles a [`SentenceGraph`] and checks that heads form a single tree.
///
/// ```
/// use pcap_lingu::{DepRole, PosCategory, SentenceGraph, Vocabulary};
///
/// let graph = SentenceGraph::builder("tcp port 80")
///     .token("tcp", PosCategory::Other, DepRole::parse("compound"), 2)
///     .token("port", PosCategory::Other, DepRole::parse("compound"), 2)
///     .token("80", PosCategory::Other, DepRole::Root, 2)
///     .noun_chunk(0, 2, 2)
///     .annotate_with(Vocabulary::builtin())
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.tokens()[0].pos(), PosCategory::Noun);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceGraphBuilder<'v> {
    text: String,
    tokens: Vec<TokenSpec>,
    chunks: Vec<(usize, usize, usize)>,
    vocabulary: Option<&'v Vocabulary>,
}

impl<'v> SentenceGraphBuilder<'v> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
            chunks: Vec::new(),
            vocabulary: None,
        }
    }

    pub fn push(mut self, spec: TokenSpec) -> Self {
        self.tokens.push(spec);
        self
    }

    pub fn token(self, text: impl Into<String>, pos: PosCategory, dep: DepRole, head: usize) -> Self {
        self.push(TokenSpec::new(text, pos, dep, head))
    }

    /// Add a noun chunk covering `start..=end` whose head is `root`.
    pub fn noun_chunk(mut self, start: usize, end: usize, root: usize) -> Self {
        self.chunks.push((start, end, root));
        self
    }

    /// Apply the vocabulary overrides to every token when building.
    pub fn annotate_with(mut self, vocabulary: &'v Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn build(self) -> Result<SentenceGraph, GraphError> {
        let len = self.tokens.len();

        for (token, spec) in self.tokens.iter().enumerate() {
            if spec.head >= len {
                return Err(GraphError::HeadOutOfBounds {
                    token,
                    head: spec.head,
                    len,
                });
            }
        }

        let mut roots = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(i, spec)| spec.head == *i)
            .map(|(i, _)| i);
        match (roots.next(), roots.next()) {
            (None, _) if len > 0 => return Err(GraphError::NoRoot),
            (Some(first), Some(second)) => return Err(GraphError::MultipleRoots { first, second }),
            _ => {}
        }

        for token in 0..len {
            if !reaches_root(&self.tokens, token) {
                return Err(GraphError::Cycle { token });
            }
        }

        let mut noun_chunks = Vec::with_capacity(self.chunks.len());
        for &(start, end, root) in &self.chunks {
            if start > end || end >= len {
                return Err(GraphError::ChunkOutOfBounds { start, end, len });
            }
            if root < start || root > end {
                return Err(GraphError::ChunkRootOutside { start, end, root });
            }
            noun_chunks.push(NounChunk {
                start: TokenId(start),
                end: TokenId(end),
                root: TokenId(root),
            });
        }

        let mut children = vec![Vec::new(); len];
        for (i, spec) in self.tokens.iter().enumerate() {
            if spec.head != i {
                children[spec.head].push(TokenId(i));
            }
        }

        let vocabulary = self.vocabulary;
        let tokens = self
            .tokens
            .into_iter()
            .zip(children)
            .enumerate()
            .map(|(i, (spec, children))| {
                let (pos, tag) = match vocabulary.and_then(|v| v.annotate(&spec.text)) {
                    Some(tag) => (PosCategory::Noun, Some(tag)),
                    None => (spec.pos, spec.tag),
                };
                AnnotatedToken {
                    id: TokenId(i),
                    text: spec.text,
                    pos,
                    tag,
                    dep: spec.dep,
                    head: TokenId(spec.head),
                    children,
                }
            })
            .collect();

        Ok(SentenceGraph {
            text: self.text,
            tokens,
            noun_chunks,
        })
    }
}

fn reaches_root(tokens: &[TokenSpec], start: usize) -> bool {
    let mut current = start;
    for _ in 0..=tokens.len() {
        let head = tokens[current].head;
        if head == current {
            return true;
        }
        current = head;
    }
    false
}
