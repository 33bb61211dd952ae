//! Per-sentence extraction pipeline.
//!
//! Runs the three stages in order: chunk root resolution, negation
//! extraction, then conjunct flattening and clause splitting. Each sentence
//! is processed independently; a failure only affects its own result.

use crate::config::PipelineConfig;
use crate::conjunction::{Clause, ConjunctionFlattener, ConjunctionSplitter};
use crate::errors::PipelineResult;
use crate::negation::{NegationExtractor, NegationResult};
use crate::root_chunk::{ChunkRootResolver, Member};
use crate::sentence::{SentenceGraph, TokenId};
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

/// Non-fatal findings attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A pronoun subject with no noun sibling; a placeholder stands in for it.
    UnresolvedReference { pronoun: TokenId },
    /// A conjunct was merged without a coordinating word between the parts.
    MissingConjunctionMarker { conjunct: TokenId, head: TokenId },
    /// The clause at this position has a placeholder or non-nominal root.
    SuspectClauseRoot { clause: usize },
}

/// Everything extracted from one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    pub clauses: Vec<Clause>,
    pub negation_count: usize,
    pub negation_cues: Vec<TokenId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SentenceAnalysis {
    pub fn is_negated(&self) -> bool {
        self.negation_count > 0
    }

    pub fn clause_texts<'g>(&self, graph: &'g SentenceGraph) -> Vec<Vec<&'g str>> {
        self.clauses.iter().map(|c| c.member_texts(graph)).collect()
    }
}

/// The configured extraction pipeline.
///
/// Holds only read-only state, so one instance can serve any number of
/// sentences, from any number of threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    vocabulary: Vocabulary,
    negation: NegationExtractor,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let vocabulary = config.vocabulary.build();
        let negation = config.negation.extractor();
        Self {
            config,
            vocabulary,
            negation,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The vocabulary the annotation step should apply before parsing.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn analyze(&self, graph: &SentenceGraph) -> PipelineResult<SentenceAnalysis> {
        let _span = debug_span!("analyze", sentence = graph.text()).entered();
        let mut diagnostics = Vec::new();

        let chunks = ChunkRootResolver::new().resolve(graph);
        let mut unresolved: Vec<TokenId> = chunks
            .iter()
            .flat_map(|c| std::iter::once(c.root).chain(c.members.iter().copied()))
            .filter_map(|m| match m {
                Member::Unresolved { pronoun } => Some(pronoun),
                Member::Token(_) => None,
            })
            .collect();
        unresolved.sort();
        unresolved.dedup();
        diagnostics.extend(
            unresolved
                .into_iter()
                .map(|pronoun| Diagnostic::UnresolvedReference { pronoun }),
        );

        let NegationResult {
            chunks,
            negation_count,
            cues,
        } = self.negation.extract(graph, &chunks);

        let flattener = ConjunctionFlattener::new();
        diagnostics.extend(
            flattener
                .missing_markers(graph, &chunks)
                .into_iter()
                .map(|(conjunct, head)| Diagnostic::MissingConjunctionMarker { conjunct, head }),
        );
        let flattened = flattener.flatten(graph, chunks)?;
        let clauses = ConjunctionSplitter::new(&self.vocabulary).split(graph, &flattened);

        for (clause, _) in clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_suspect_root(graph))
        {
            warn!(
                clause,
                members = ?clauses[clause].member_texts(graph),
                "clause root is not nominal"
            );
            diagnostics.push(Diagnostic::SuspectClauseRoot { clause });
        }

        debug!(clauses = clauses.len(), negation_count, "analyzed sentence");
        Ok(SentenceAnalysis {
            clauses,
            negation_count,
            negation_cues: cues,
            diagnostics,
        })
    }

    /// Analyze each sentence on its own; one failure leaves the rest intact.
    pub fn analyze_batch<'g, I>(&self, graphs: I) -> Vec<PipelineResult<SentenceAnalysis>>
    where
        I: IntoIterator<Item = &'g SentenceGraph>,
    {
        graphs.into_iter().map(|graph| self.analyze(graph)).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
