use super::builder::{build_conditional_tree, build_fp_tree};
use super::config::MiningConfig;
use super::error::MiningError;
use super::tree::FPTree;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, trace};

/// A mined itemset. The most recently added item comes first, followed by
/// the suffix it extended; callers needing a canonical order sort it.
pub type Itemset<T> = Vec<T>;

/// Mines every itemset contained in at least `min_support` transactions.
///
/// `transactions` is traversed exactly once. Results are produced lazily,
/// depth-first, with no global ordering guarantee.
pub fn frequent_itemsets<T, I, Tx>(
    transactions: I,
    min_support: usize,
) -> Result<FrequentItemsets<T>, MiningError>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Tx>,
    Tx: IntoIterator<Item = T>,
{
    mine(transactions, &MiningConfig::new(min_support))
}

pub fn mine<T, I, Tx>(transactions: I, config: &MiningConfig) -> Result<FrequentItemsets<T>, MiningError>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Tx>,
    Tx: IntoIterator<Item = T>,
{
    config.validate()?;

    let transactions: Vec<Vec<T>> = transactions.into_iter().map(distinct_items).collect();
    let ranks = rank_frequent_items(&transactions, config.min_support);
    debug!(
        transactions = transactions.len(),
        frequent_items = ranks.len(),
        min_support = config.min_support,
        "counted item supports"
    );

    let fp_tree = build_fp_tree(
        transactions
            .into_iter()
            .map(|transaction| clean_transaction(transaction, &ranks)),
    );
    debug!(nodes = fp_tree.len(), "built master tree");

    Ok(FrequentItemsets::new(fp_tree, config))
}

fn distinct_items<T, Tx>(transaction: Tx) -> Vec<T>
where
    T: Eq + Hash + Clone,
    Tx: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    transaction
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Ranks the items meeting `min_count` by descending support; ties keep the
/// order in which the items first appeared.
fn rank_frequent_items<T>(transactions: &[Vec<T>], min_count: usize) -> HashMap<T, usize>
where
    T: Eq + Hash + Clone,
{
    let mut item_counts: HashMap<&T, (usize, usize)> = HashMap::new();
    for transaction in transactions {
        for item in transaction {
            let first_seen = item_counts.len();
            item_counts.entry(item).or_insert((0, first_seen)).0 += 1;
        }
    }

    let mut frequent_items: Vec<(&T, usize, usize)> = item_counts
        .into_iter()
        .filter(|&(_, (count, _))| count >= min_count)
        .map(|(item, (count, first_seen))| (item, count, first_seen))
        .collect();

    frequent_items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    frequent_items
        .into_iter()
        .enumerate()
        .map(|(rank, (item, _, _))| (item.clone(), rank))
        .collect()
}

fn clean_transaction<T>(transaction: Vec<T>, ranks: &HashMap<T, usize>) -> Vec<T>
where
    T: Eq + Hash,
{
    let mut ranked: Vec<(usize, T)> = transaction
        .into_iter()
        .filter_map(|item| ranks.get(&item).map(|&rank| (rank, item)))
        .collect();
    ranked.sort_unstable_by_key(|&(rank, _)| rank);
    ranked.into_iter().map(|(_, item)| item).collect()
}

struct Frame<T> {
    tree: FPTree<T>,
    suffix: Vec<T>,
    pending: std::vec::IntoIter<T>,
}

impl<T: Eq + Hash + Clone> Frame<T> {
    fn new(tree: FPTree<T>, suffix: Vec<T>) -> Self {
        let pending = tree.items().cloned().collect::<Vec<_>>().into_iter();
        Self {
            tree,
            suffix,
            pending,
        }
    }
}

/// Lazy depth-first walk over the conditional trees of a master FP-tree.
///
/// Each frame on the worklist is one tree together with the suffix it was
/// conditioned on, so long frequent sequences grow the heap rather than the
/// call stack.
pub struct FrequentItemsets<T> {
    min_support: usize,
    max_len: Option<usize>,
    stack: Vec<Frame<T>>,
}

impl<T: Eq + Hash + Clone> FrequentItemsets<T> {
    fn new(fp_tree: FPTree<T>, config: &MiningConfig) -> Self {
        let mut stack = Vec::new();
        if !fp_tree.is_empty() {
            stack.push(Frame::new(fp_tree, Vec::new()));
        }
        Self {
            min_support: config.min_support,
            max_len: config.max_len,
            stack,
        }
    }

    /// Drops the supports and yields only the itemsets.
    pub fn without_support(self) -> impl Iterator<Item = Itemset<T>> {
        self.map(|(itemset, _)| itemset)
    }
}

impl<T: Eq + Hash + Clone> Iterator for FrequentItemsets<T> {
    type Item = (Itemset<T>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(item) = frame.pending.next() else {
                self.stack.pop();
                continue;
            };

            let support = frame.tree.support(&item);
            if support < self.min_support {
                continue;
            }

            let mut itemset = Vec::with_capacity(frame.suffix.len() + 1);
            itemset.push(item.clone());
            itemset.extend(frame.suffix.iter().cloned());

            if self.max_len.map_or(true, |max_len| itemset.len() < max_len) {
                let conditional_tree =
                    build_conditional_tree(frame.tree.prefix_paths(&item), self.min_support);
                trace!(
                    depth = itemset.len(),
                    nodes = conditional_tree.len(),
                    "built conditional tree"
                );
                if !conditional_tree.is_empty() {
                    self.stack.push(Frame::new(conditional_tree, itemset.clone()));
                }
            }

            return Some((itemset, support));
        }
    }
}
