use thiserror::Error;

use super::tree::NodeId;

/// Invariant violations raised by FP-tree operations.
///
/// None of these are recoverable runtime states: each one means a caller
/// handed the tree a handle or request that cannot be valid for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("invalid node relationship: {0}")]
    InvalidNodeRelationship(&'static str),

    #[error("the root node carries no count")]
    InvalidCountOperation,

    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MiningError {
    #[error("minimum support must be at least 1")]
    InvalidMinimumSupport,

    #[error("relative minimum support must lie in (0, 1], got {0}")]
    InvalidRelativeSupport(f64),

    #[error("maximum itemset length must be at least 1")]
    InvalidMaxLen,
}
