//! Semantic clause extraction for packet filter sentences.
//!
//! Takes an English sentence that an external parser has already annotated
//! (part of speech, dependency roles, noun chunks, domain vocabulary tags)
//! and reduces it to independent clauses, each intended to become one
//! primitive of a packet filter expression.
//!
//! ## Stages
//!
//! 1. [`ChunkRootResolver`] - noun chunks to [`RootChunk`]s, pronouns resolved
//! 2. [`NegationExtractor`] - negation cues counted and stripped
//! 3. [`ConjunctionFlattener`] + [`ConjunctionSplitter`] - coordinated chunks
//!    merged, then cut at "and" into [`Clause`]s
//!
//! [`Pipeline`] runs all three for one sentence at a time.
//!
//! ## Usage
//!
//! ```
//! use pcap_lingu::{DepRole, Pipeline, PipelineConfig, PosCategory, SentenceGraph};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//!
//! // "ip4 without port 80"
//! let graph = SentenceGraph::builder("ip4 without port 80")
//!     .token("ip4", PosCategory::Noun, DepRole::Root, 0)
//!     .token("without", PosCategory::Other, DepRole::parse("prep"), 0)
//!     .token("port", PosCategory::Noun, DepRole::parse("compound"), 3)
//!     .token("80", PosCategory::Noun, DepRole::parse("pobj"), 1)
//!     .noun_chunk(0, 0, 0)
//!     .noun_chunk(2, 3, 3)
//!     .annotate_with(pipeline.vocabulary())
//!     .build()
//!     .unwrap();
//!
//! let analysis = pipeline.analyze(&graph).unwrap();
//! assert_eq!(analysis.negation_count, 1);
//! assert_eq!(analysis.clause_texts(&graph), vec![vec!["ip4"], vec!["port", "80"]]);
//! ```
//!
//! Rendering clauses into a filter expression is left to a later stage.

mod config;
mod conjunction;
mod errors;
mod negation;
mod pipeline;
mod root_chunk;
pub mod sentence;
pub mod vocabulary;

pub use config::{NegationConfig, PipelineConfig, VocabularyConfig};
pub use conjunction::{is_direction_combo_at, Clause, ConjunctionFlattener, ConjunctionSplitter};
pub use errors::{GraphError, PipelineError, PipelineResult};
pub use negation::{NegationExtractor, NegationResult};
pub use pipeline::{Diagnostic, Pipeline, SentenceAnalysis};
pub use root_chunk::{ChunkRootResolver, Member, RootChunk};
pub use sentence::{
    AnnotatedToken, ClausesDisplay, DepRole, NounChunk, PosCategory, SentenceGraph,
    SentenceGraphBuilder, TokenId, TokenSpec, TreeDisplay, TreeTableDisplay,
};
pub use vocabulary::{DomainTag, Direction, FilterType, Protocol, VocabTerm, Vocabulary};
