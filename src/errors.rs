//! Error types for graph construction and sentence processing.
//!
//! Unresolved pronouns and missing conjunction markers are not errors; they
//! surface as [`Diagnostic`](crate::Diagnostic) values on the analysis.

use crate::TokenId;
use thiserror::Error;

/// Reasons an annotated token graph is rejected by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("token {token} has head {head} outside a sentence of {len} tokens")]
    HeadOutOfBounds { token: usize, head: usize, len: usize },

    #[error("sentence has no root token")]
    NoRoot,

    #[error("sentence has more than one root: tokens {first} and {second}")]
    MultipleRoots { first: usize, second: usize },

    #[error("token {token} does not reach the sentence root through its heads")]
    Cycle { token: usize },

    #[error("noun chunk {start}..={end} lies outside a sentence of {len} tokens")]
    ChunkOutOfBounds { start: usize, end: usize, len: usize },

    #[error("noun chunk {start}..={end} has root {root} outside its span")]
    ChunkRootOutside { start: usize, end: usize, root: usize },
}

/// Errors that fail a single sentence's pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A conjunct chunk whose governing chunk is missing from the working list.
    #[error("structural inconsistency: conjunct {conjunct} has no chunk rooted at its head {head}")]
    StructuralInconsistency { conjunct: TokenId, head: TokenId },

    #[error("invalid sentence graph: {0}")]
    Graph(#[from] GraphError),

    #[error("invalid pipeline config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read pipeline config {path}: {message}")]
    ConfigRead { path: String, message: String },
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
