// Tree module - arena-backed FP-tree and its operations

mod tree;
mod tree_ops;

// Re-export the main types
pub use tree::{FPNode, FPTree, NodeId, TreeId};
pub use tree_ops::Nodes;
