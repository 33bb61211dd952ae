//! Conjunct flattening and clause splitting.
//!
//! Chunks coordinated through a `conj` edge are first merged into their
//! governing chunk, with the coordinating word between them. Every merged
//! member list is then cut at each "and" that is not part of a
//! "source and destination" combo, and each piece becomes a [`Clause`].

use crate::errors::PipelineError;
use crate::root_chunk::{Member, RootChunk};
use crate::sentence::{DepRole, PosCategory, SentenceGraph, TokenId};
use crate::vocabulary::{Direction, Vocabulary};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SPLIT_WORD: &str = "and";

/// One independent unit of the sentence, meant to become one filter primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Always the last member of the clause.
    pub root: Member,
    pub members: Vec<Member>,
}

impl Clause {
    /// Build a clause rooted at its last member; `None` for an empty sequence.
    pub fn from_members(members: Vec<Member>) -> Option<Self> {
        let root = *members.last()?;
        Some(Self { root, members })
    }

    pub fn member_texts<'g>(&self, graph: &'g SentenceGraph) -> Vec<&'g str> {
        self.members.iter().map(|m| m.display_text(graph)).collect()
    }

    /// The last-member root is a placeholder or not nominal at all.
    pub fn has_suspect_root(&self, graph: &SentenceGraph) -> bool {
        match self.root {
            Member::Unresolved { .. } => true,
            Member::Token(id) => !matches!(
                graph[id].pos(),
                PosCategory::Noun | PosCategory::Pronoun
            ),
        }
    }

    /// Classify a preserved direction combo: "source and destination" is
    /// `SrcAndDst`, "source or destination" is `SrcOrDst`.
    pub fn direction_combo(&self, graph: &SentenceGraph, vocabulary: &Vocabulary) -> Option<Direction> {
        (0..self.members.len())
            .filter(|&i| is_direction_combo_at(graph, vocabulary, &self.members, i))
            .find_map(|i| match self.members[i].text(graph)?.to_lowercase().as_str() {
                "and" => Some(Direction::SrcAndDst),
                "or" => Some(Direction::SrcOrDst),
                _ => None,
            })
    }
}

fn is_conjunction(graph: &SentenceGraph, member: Member) -> bool {
    member
        .token()
        .map_or(false, |id| graph[id].pos() == PosCategory::Conjunction)
}

fn is_and_token(graph: &SentenceGraph, member: Member) -> bool {
    member.text(graph) == Some(SPLIT_WORD)
}

fn single_direction(graph: &SentenceGraph, vocabulary: &Vocabulary, member: Member) -> Option<Direction> {
    member
        .text(graph)
        .and_then(|text| vocabulary.direction(text))
        .filter(|d| d.is_single())
}

/// A conjunction at `i` flanked by two single direction terms.
pub fn is_direction_combo_at(
    graph: &SentenceGraph,
    vocabulary: &Vocabulary,
    members: &[Member],
    i: usize,
) -> bool {
    i >= 1
        && i + 1 < members.len()
        && is_conjunction(graph, members[i])
        && single_direction(graph, vocabulary, members[i - 1]).is_some()
        && single_direction(graph, vocabulary, members[i + 1]).is_some()
}

/// Merges conjunct chunks into the chunk rooted at their head.
#[derive(Debug, Clone, Default)]
pub struct ConjunctionFlattener;

impl ConjunctionFlattener {
    pub fn new() -> Self {
        Self
    }

    /// Single forward pass over the chunks in their original order.
    ///
    /// A conjunct chunk (root with role `conj`) is merged with the chunk whose
    /// root is the conjunct's head: head members, then the head's first
    /// conjunction child if it has one, then the conjunct members. The merged
    /// chunk is rooted at the conjunct and takes the earlier of the two
    /// positions, so a later conjunct of the same coordination finds it.
    ///
    /// A merge result is not re-examined. When the governing chunk came
    /// earlier, the remaining chunks move up one position and the scan
    /// resumes past the next one, so that chunk is left as it is. In
    /// "tcp or udp or icmp" only "udp" joins "tcp".
    pub fn flatten(
        &self,
        graph: &SentenceGraph,
        chunks: Vec<RootChunk>,
    ) -> Result<Vec<RootChunk>, PipelineError> {
        let mut slots: Vec<Option<RootChunk>> = chunks.into_iter().map(Some).collect();
        let mut skip_next = false;

        for i in 0..slots.len() {
            let Some(chunk) = slots[i].take() else {
                continue;
            };
            if skip_next {
                skip_next = false;
                slots[i] = Some(chunk);
                continue;
            }
            let conjunct = match chunk.root {
                Member::Token(root) if *graph[root].dep() == DepRole::Conj => root,
                _ => {
                    slots[i] = Some(chunk);
                    continue;
                }
            };

            let head = graph[conjunct].head();
            let governing = slots
                .iter()
                .position(|slot| matches!(slot, Some(c) if c.root == Member::Token(head)))
                .and_then(|h| slots[h].take().map(|c| (h, c)));
            let Some((h, head_chunk)) = governing else {
                return Err(PipelineError::StructuralInconsistency { conjunct, head });
            };

            let marker = graph.first_conjunction_child(head);
            if marker.is_none() {
                debug!(%conjunct, %head, "conjunct head has no conjunction marker");
            }

            let mut joined = head_chunk.members;
            joined.extend(marker.map(Member::Token));
            joined.extend(chunk.members);

            debug!(%conjunct, %head, members = joined.len(), "merged conjunct chunk");
            slots[i.min(h)] = Some(RootChunk::new(Member::Token(conjunct), joined));
            skip_next = h < i;
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Conjunct chunks whose head lacks a conjunction child, as (conjunct, head).
    pub fn missing_markers(&self, graph: &SentenceGraph, chunks: &[RootChunk]) -> Vec<(TokenId, TokenId)> {
        chunks
            .iter()
            .filter_map(|chunk| chunk.root.token())
            .filter(|&root| *graph[root].dep() == DepRole::Conj)
            .map(|root| (root, graph[root].head()))
            .filter(|&(_, head)| graph.first_conjunction_child(head).is_none())
            .collect()
    }
}

/// Cuts member sequences at "and" into clauses.
#[derive(Debug, Clone)]
pub struct ConjunctionSplitter<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> ConjunctionSplitter<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Split one member sequence. The "and" at a cut is dropped; empty pieces
    /// are not emitted.
    pub fn split_members(&self, graph: &SentenceGraph, members: &[Member]) -> Vec<Vec<Member>> {
        let mut pieces = Vec::new();
        let mut rest = members;
        let mut i = 0;

        while i < rest.len() {
            if is_and_token(graph, rest[i])
                && !is_direction_combo_at(graph, self.vocabulary, rest, i)
            {
                if i > 0 {
                    pieces.push(rest[..i].to_vec());
                }
                rest = &rest[i + 1..];
                i = 0;
            } else {
                i += 1;
            }
        }

        if !rest.is_empty() {
            pieces.push(rest.to_vec());
        }
        pieces
    }

    pub fn split(&self, graph: &SentenceGraph, chunks: &[RootChunk]) -> Vec<Clause> {
        let clauses: Vec<Clause> = chunks
            .iter()
            .flat_map(|chunk| self.split_members(graph, &chunk.members))
            .filter_map(Clause::from_members)
            .collect();

        debug!(chunks = chunks.len(), clauses = clauses.len(), "split conjunctions");
        clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::SentenceGraph;

    fn dep(label: &str) -> DepRole {
        DepRole::parse(label)
    }

    fn token(id: usize) -> Member {
        Member::Token(TokenId(id))
    }

    fn tokens(ids: &[usize]) -> Vec<Member> {
        ids.iter().map(|&id| token(id)).collect()
    }

    /// "src and dst host and port or net"
    fn mixed_conjunctions() -> SentenceGraph {
        SentenceGraph::builder("src and dst host and port or net")
            .token("src", PosCategory::Noun, dep("compound"), 3)
            .token("and", PosCategory::Conjunction, DepRole::Cc, 0)
            .token("dst", PosCategory::Noun, DepRole::Conj, 0)
            .token("host", PosCategory::Noun, DepRole::Root, 3)
            .token("and", PosCategory::Conjunction, DepRole::Cc, 3)
            .token("port", PosCategory::Noun, DepRole::Conj, 3)
            .token("or", PosCategory::Conjunction, DepRole::Cc, 5)
            .token("net", PosCategory::Noun, DepRole::Conj, 5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_direction_combo_is_kept_and_plain_and_is_cut() {
        let graph = mixed_conjunctions();
        let splitter = ConjunctionSplitter::new(Vocabulary::builtin());

        let pieces = splitter.split_members(&graph, &tokens(&[0, 1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(pieces, vec![tokens(&[0, 1, 2, 3]), tokens(&[5, 6, 7])]);
    }

    #[test]
    fn test_combo_needs_both_neighbours() {
        let graph = mixed_conjunctions();
        let vocabulary = Vocabulary::builtin();
        let members = tokens(&[0, 1, 2, 3, 4, 5]);

        assert!(is_direction_combo_at(&graph, vocabulary, &members, 1));
        assert!(!is_direction_combo_at(&graph, vocabulary, &members, 4));
        assert!(!is_direction_combo_at(&graph, vocabulary, &members, 0));
        assert!(!is_direction_combo_at(&graph, vocabulary, &tokens(&[0, 1]), 1));
    }

    #[test]
    fn test_leading_and_trailing_and_leave_no_empty_clause() {
        let graph = mixed_conjunctions();
        let splitter = ConjunctionSplitter::new(Vocabulary::builtin());

        assert_eq!(
            splitter.split_members(&graph, &tokens(&[4, 5, 4])),
            vec![tokens(&[5])]
        );
        assert!(splitter.split_members(&graph, &[]).is_empty());
        assert!(splitter.split_members(&graph, &tokens(&[4])).is_empty());
    }

    #[test]
    fn test_clause_root_is_last_member() {
        let graph = mixed_conjunctions();
        let splitter = ConjunctionSplitter::new(Vocabulary::builtin());
        let chunk = RootChunk::new(token(3), tokens(&[0, 1, 2, 3, 4, 5]));

        let clauses = splitter.split(&graph, &[chunk]);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].root, token(3));
        assert_eq!(clauses[1].root, token(5));
        assert_eq!(clauses[0].member_texts(&graph), vec!["src", "and", "dst", "host"]);
        assert_eq!(
            clauses[0].direction_combo(&graph, Vocabulary::builtin()),
            Some(Direction::SrcAndDst)
        );
        assert_eq!(clauses[1].direction_combo(&graph, Vocabulary::builtin()), None);
    }

    #[test]
    fn test_suspect_roots() {
        let graph = mixed_conjunctions();
        let conjunction_root = Clause::from_members(tokens(&[3, 6])).unwrap();
        let placeholder = Clause::from_members(vec![Member::Unresolved { pronoun: TokenId(0) }]).unwrap();
        let noun_root = Clause::from_members(tokens(&[6, 7])).unwrap();

        assert!(conjunction_root.has_suspect_root(&graph));
        assert!(placeholder.has_suspect_root(&graph));
        assert!(!noun_root.has_suspect_root(&graph));
        assert!(Clause::from_members(Vec::new()).is_none());
    }

    /// "tcp or udp or icmp"
    fn protocol_chain() -> SentenceGraph {
        SentenceGraph::builder("tcp or udp or icmp")
            .token("tcp", PosCategory::Noun, DepRole::Root, 0)
            .token("or", PosCategory::Conjunction, DepRole::Cc, 0)
            .token("udp", PosCategory::Noun, DepRole::Conj, 0)
            .token("or", PosCategory::Conjunction, DepRole::Cc, 2)
            .token("icmp", PosCategory::Noun, DepRole::Conj, 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_flatten_steps_over_chunk_after_earlier_head_merge() {
        // host <- port (conj, marker "and"), port <- net (conj, marker "or")
        let graph = mixed_conjunctions();
        let chunks = vec![
            RootChunk::new(token(3), tokens(&[3])),
            RootChunk::new(token(5), tokens(&[5])),
            RootChunk::new(token(7), tokens(&[7])),
        ];

        let flat = ConjunctionFlattener::new().flatten(&graph, chunks).unwrap();
        assert_eq!(
            flat,
            vec![
                RootChunk::new(token(5), tokens(&[3, 4, 5])),
                RootChunk::new(token(7), tokens(&[7])),
            ]
        );
    }

    #[test]
    fn test_or_chain_joins_first_pair_only() {
        let graph = protocol_chain();
        let chunks = vec![
            RootChunk::new(token(0), tokens(&[0])),
            RootChunk::new(token(2), tokens(&[2])),
            RootChunk::new(token(4), tokens(&[4])),
        ];

        let flat = ConjunctionFlattener::new().flatten(&graph, chunks).unwrap();
        assert_eq!(
            flat,
            vec![
                RootChunk::new(token(2), tokens(&[0, 1, 2])),
                RootChunk::new(token(4), tokens(&[4])),
            ]
        );
    }

    #[test]
    fn test_stepped_over_chunk_still_governs_later_conjunct() {
        let graph = mixed_conjunctions();
        let chunks = vec![
            RootChunk::new(token(0), tokens(&[0])),
            RootChunk::new(token(2), tokens(&[2])),
            RootChunk::new(token(3), tokens(&[3])),
            RootChunk::new(token(5), tokens(&[5])),
        ];

        let flat = ConjunctionFlattener::new().flatten(&graph, chunks).unwrap();
        assert_eq!(
            flat,
            vec![
                RootChunk::new(token(2), tokens(&[0, 1, 2])),
                RootChunk::new(token(5), tokens(&[3, 4, 5])),
            ]
        );
    }

    #[test]
    fn test_flatten_handles_head_after_conjunct() {
        let graph = mixed_conjunctions();
        let chunks = vec![
            RootChunk::new(token(5), tokens(&[5])),
            RootChunk::new(token(3), tokens(&[3])),
        ];

        let flat = ConjunctionFlattener::new().flatten(&graph, chunks).unwrap();
        assert_eq!(flat, vec![RootChunk::new(token(5), tokens(&[3, 4, 5]))]);
    }

    #[test]
    fn test_flatten_without_marker_omits_it() {
        let graph = SentenceGraph::builder("tcp udp")
            .token("tcp", PosCategory::Noun, DepRole::Root, 0)
            .token("udp", PosCategory::Noun, DepRole::Conj, 0)
            .build()
            .unwrap();
        let chunks = vec![
            RootChunk::new(token(0), tokens(&[0])),
            RootChunk::new(token(1), tokens(&[1])),
        ];
        let flattener = ConjunctionFlattener::new();

        assert_eq!(flattener.missing_markers(&graph, &chunks), vec![(TokenId(1), TokenId(0))]);
        let flat = flattener.flatten(&graph, chunks).unwrap();
        assert_eq!(flat, vec![RootChunk::new(token(1), tokens(&[0, 1]))]);
    }

    #[test]
    fn test_flatten_reports_missing_governing_chunk() {
        let graph = mixed_conjunctions();
        let chunks = vec![RootChunk::new(token(5), tokens(&[5]))];

        let err = ConjunctionFlattener::new().flatten(&graph, chunks).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::StructuralInconsistency { conjunct, head }
                if conjunct == TokenId(5) && head == TokenId(3)
        ));
    }
}
