use super::tests::{brute_force, normalize};
use super::*;

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

/// Walks the tree from the root and checks parent links, child keys and
/// that every item's chain holds exactly its live nodes.
fn validate_tree(tree: &FPTree<u8>) {
    let root = tree.root();
    assert!(tree[root].is_root());

    let mut by_item: HashMap<u8, HashSet<NodeId>> = HashMap::new();
    let mut stack = vec![root];
    let mut reached = 0usize;

    while let Some(id) = stack.pop() {
        let node = &tree[id];
        for child_id in node.children() {
            let child = &tree[child_id];
            let item = *child.item().expect("non-root node without item");
            assert_eq!(child.parent(), Some(id), "child must point back at its parent");
            assert_eq!(node.search(&item), Some(child_id), "child keyed by its own item");
            by_item.entry(item).or_default().insert(child_id);
            reached += 1;
            stack.push(child_id);
        }
    }

    assert_eq!(reached, tree.len(), "every live node is reachable from the root");

    for (item, expected) in &by_item {
        let chained: Vec<NodeId> = tree.nodes_for(item).map(FPNode::id).collect();
        let unique: HashSet<NodeId> = chained.iter().copied().collect();
        assert_eq!(unique.len(), chained.len(), "chain of {item} repeats a node");
        assert_eq!(&unique, expected, "chain of {item} must hold its live nodes");
    }

    let routed: HashSet<u8> = tree.items().copied().collect();
    let present: HashSet<u8> = by_item.keys().copied().collect();
    assert_eq!(routed, present, "routes exist exactly for items with live nodes");
}

fn sorted_tree(transactions: &[Vec<u8>]) -> FPTree<u8> {
    build_fp_tree(transactions.iter().map(|transaction| {
        let mut items = transaction.clone();
        items.sort_unstable();
        items.dedup();
        items
    }))
}

fn containing(transactions: &[Vec<u8>], items: &[u8]) -> usize {
    transactions
        .iter()
        .filter(|transaction| items.iter().all(|item| transaction.contains(item)))
        .count()
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..8, 0..6), 0..30)
}

proptest! {
    #[test]
    fn prop_mining_matches_brute_force(
        transactions in transactions_strategy(),
        min_support in 1usize..5,
    ) {
        let found = normalize(frequent_itemsets(transactions.clone(), min_support).unwrap());
        prop_assert_eq!(found, brute_force(&transactions, min_support));
    }

    #[test]
    fn prop_result_independent_of_transaction_order(
        (transactions, shuffled) in transactions_strategy()
            .prop_flat_map(|txs| (Just(txs.clone()), Just(txs).prop_shuffle())),
        min_support in 1usize..4,
    ) {
        let original = normalize(frequent_itemsets(transactions, min_support).unwrap());
        let reordered = normalize(frequent_itemsets(shuffled, min_support).unwrap());
        prop_assert_eq!(original, reordered);
    }

    #[test]
    fn prop_chains_sum_to_item_support(transactions in transactions_strategy()) {
        let tree = sorted_tree(&transactions);
        validate_tree(&tree);

        for item in 0u8..8 {
            prop_assert_eq!(tree.support(&item), containing(&transactions, &[item]));
        }
    }

    #[test]
    fn prop_conditional_trees_are_pruned(
        transactions in transactions_strategy(),
        min_support in 1usize..4,
    ) {
        let tree = sorted_tree(&transactions);

        for condition in 0u8..8 {
            if tree.support(&condition) == 0 {
                continue;
            }
            let cond_tree = build_conditional_tree(tree.prefix_paths(&condition), min_support);
            validate_tree(&cond_tree);

            prop_assert_eq!(cond_tree.nodes_for(&condition).count(), 0);
            for &item in cond_tree.items() {
                let support = cond_tree.support(&item);
                prop_assert!(support >= min_support);
                prop_assert_eq!(support, containing(&transactions, &[item, condition]));
            }
        }
    }

    #[test]
    fn prop_remove_item_keeps_other_supports(
        transactions in transactions_strategy(),
        doomed in 0u8..8,
    ) {
        let mut tree = sorted_tree(&transactions);
        tree.remove_item(&doomed);
        validate_tree(&tree);

        prop_assert_eq!(tree.nodes_for(&doomed).count(), 0);
        for item in (0u8..8).filter(|&item| item != doomed) {
            prop_assert_eq!(tree.support(&item), containing(&transactions, &[item]));
        }
    }
}
