//! Error types for query parsing and tree walking.
//!
//! The grammars are total: malformed input degrades to literal values instead of
//! failing. The only parse failures are running past the nesting limit or the limit on
//! chained boolean operators.

use thiserror::Error;

use crate::ast::NodeKind;

/// Parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Groups, negations or nested field queries are nested deeper than allowed.
    #[error("query nesting exceeds the limit of {limit} levels")]
    DepthExceeded {
        /// The configured nesting limit.
        limit: usize,
        /// Byte position in the input where the limit was hit.
        position: usize,
    },

    /// Boolean chains join more operators than allowed. Each `and`/`or` in a chain adds
    /// one level to the tree, so the limit bounds how deep walkers recurse.
    #[error("boolean chains exceed the limit of {limit} operators")]
    ChainTooLong {
        /// The configured operator limit.
        limit: usize,
        /// Byte position in the input where the limit was hit.
        position: usize,
    },
}

impl ParseError {
    /// Byte position in the input where parsing failed.
    pub fn position(&self) -> usize {
        match self {
            Self::DepthExceeded { position, .. } | Self::ChainTooLong { position, .. } => {
                *position
            }
        }
    }

    /// Formats the error with the query and a caret under the failing position.
    pub fn format_with_context(&self, query: &str) -> String {
        let clamped = self.position().min(query.len());
        let column = query
            .get(..clamped)
            .map_or(clamped, |prefix| prefix.chars().count());
        format!(
            "query syntax error: {self}\n  {query}\n  {}^",
            " ".repeat(column)
        )
    }
}

/// Failure reported by a walker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// The walker met a node variant it does not support.
    #[error("{walker} cannot handle {kind} nodes")]
    UnsupportedNode {
        /// Name of the walker that rejected the node.
        walker: &'static str,
        /// The rejected variant.
        kind: NodeKind,
    },
}
