pub mod builder;
pub mod config;
pub mod dense;
pub mod error;
pub mod mining;
pub mod storage;
pub mod tree;

pub use builder::{build_conditional_tree, build_fp_tree};
pub use config::MiningConfig;
pub use dense::{fp_growth_algorithm, fp_growth_with_config, transactions_from_dense};
pub use error::{MiningError, TreeError};
pub use mining::{frequent_itemsets, mine, FrequentItemsets, Itemset};
pub use storage::{group_by_level, FrequentLevel, ItemsetStorage};
pub use tree::{FPNode, FPTree, NodeId, Nodes};


#[cfg(test)]
mod proptests;
