use super::tree::{FPNode, FPTree, NodeId};
use std::hash::Hash;
use tracing::trace;

/// Builds the master tree from transactions that are already cleaned:
/// filtered to frequent items and sorted by descending support.
pub fn build_fp_tree<T, I, Tx>(transactions: I) -> FPTree<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Tx>,
    Tx: IntoIterator<Item = T>,
{
    let mut fp_tree = FPTree::new();

    for transaction in transactions {
        fp_tree.add(transaction);
    }

    fp_tree
}

/// Builds the conditional tree for the item that ends every path.
///
/// Only the leaf counts of the imported paths are trusted; interior counts
/// are rebuilt from them. Items whose conditional support falls below
/// `min_count` are pruned and the condition item itself is stripped, so the
/// result only holds candidates for extending the current suffix.
pub fn build_conditional_tree<'a, T, I>(prefix_paths: I, min_count: usize) -> FPTree<T>
where
    T: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = Vec<&'a FPNode<T>>>,
{
    let mut conditional_tree = FPTree::new();
    let mut condition_item: Option<T> = None;

    for path in prefix_paths {
        let Some(leaf) = path.last().filter(|leaf| !leaf.is_root()) else {
            continue;
        };
        let leaf_count = leaf.weight();
        if condition_item.is_none() {
            condition_item = leaf.item().cloned();
        }

        let mut point = conditional_tree.root();
        for (depth, node) in path.iter().enumerate() {
            let Some(item) = node.item() else {
                continue;
            };
            let is_leaf = depth + 1 == path.len();

            point = match conditional_tree[point].search(item) {
                Some(existing) => {
                    if is_leaf {
                        conditional_tree.add_to_count(existing, leaf_count);
                    }
                    existing
                }
                None => {
                    let count = if is_leaf { leaf_count } else { 0 };
                    conditional_tree.push_child(point, item.clone(), count)
                }
            };
        }
    }

    let Some(condition_item) = condition_item else {
        return conditional_tree;
    };

    let ancestor_updates: Vec<(Vec<NodeId>, usize)> = conditional_tree
        .prefix_paths(&condition_item)
        .filter_map(|path| {
            let (leaf, ancestors) = path.split_last()?;
            debug_assert!(leaf.is_leaf(), "condition item nodes end their paths");
            let ancestors: Vec<NodeId> = ancestors.iter().map(|node| node.id()).collect();
            Some((ancestors, leaf.weight()))
        })
        .collect();

    for (ancestors, count) in ancestor_updates {
        for id in ancestors {
            conditional_tree.add_to_count(id, count);
        }
    }

    let candidates: Vec<T> = conditional_tree
        .items()
        .filter(|&item| *item != condition_item)
        .cloned()
        .collect();

    for item in &candidates {
        let support = conditional_tree.support(item);
        if support < min_count {
            trace!(support, min_count, "pruning infrequent item from conditional tree");
            conditional_tree.remove_item(item);
        }
    }

    conditional_tree.remove_item(&condition_item);
    conditional_tree
}
