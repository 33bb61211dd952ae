//! Error types for the fixture system.
//!
//! This module defines error types for parsing and loading fixture files
//! and for turning them into sentence graphs.

use pcap_lingu::GraphError;
use thiserror::Error;

/// Errors that can occur during fixture processing.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Error parsing a fixture file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error loading a fixture file.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A token's part-of-speech label is not a known tag.
    #[error("token {token} has unknown part of speech `{label}`")]
    UnknownPos { token: usize, label: String },

    /// The fixture's parse does not form a valid sentence graph.
    #[error("invalid sentence graph: {0}")]
    Graph(#[from] GraphError),
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
