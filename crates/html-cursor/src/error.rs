//! Error types for cursor and tree operations
//!
//! Simple, flat error hierarchy. The three boundary variants are ordinary
//! traversal outcomes, not failures.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("reached beginning of document")]
    BeginningOfDocument,

    #[error("reached end of document")]
    EndOfDocument,

    #[error("node does not have requested relative")]
    NoSuchRelative,

    #[error("Arena has no root node")]
    EmptyDocument,

    #[error("Node {0} cannot be placed inside itself or its own subtree")]
    WouldCycle(NodeId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomError {
    /// True for the outcomes a walk is expected to hit: running off either
    /// end of the document or asking for an edge that isn't there.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            DomError::BeginningOfDocument | DomError::EndOfDocument | DomError::NoSuchRelative
        )
    }
}
