/// Memory-efficient itemset storage using flat arrays
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    items: Vec<usize>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<usize>,
}

/// All mined itemsets of one size, with their supports
#[derive(Debug, Clone)]
pub struct FrequentLevel {
    pub(crate) storage: ItemsetStorage,
    pub itemset_size: usize,
}

impl ItemsetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the itemset in ascending item order and returns its index.
    pub fn add_itemset(&mut self, mut items: Vec<usize>, support: usize) -> usize {
        items.sort_unstable();
        items.dedup();

        let start = self.items.len();
        self.items.extend_from_slice(&items);
        self.offsets.push((start, items.len()));
        self.supports.push(support);

        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[usize] {
        let (start, length) = self.offsets[idx];
        &self.items[start..start + length]
    }

    pub fn support(&self, idx: usize) -> usize {
        self.supports[idx]
    }

    pub fn supports(&self) -> &[usize] {
        &self.supports
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            itemset_size,
        }
    }

    pub fn add_itemset(&mut self, items: Vec<usize>, support: usize) -> usize {
        debug_assert_eq!(items.len(), self.itemset_size);
        self.storage.add_itemset(items, support)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn get_itemset(&self, idx: usize) -> &[usize] {
        self.storage.get_itemset(idx)
    }

    pub fn support(&self, idx: usize) -> usize {
        self.storage.support(idx)
    }

    pub fn supports(&self) -> &[usize] {
        self.storage.supports()
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[usize]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[usize], usize)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.support(idx)))
    }
}

/// Groups mined itemsets by size; `levels[k - 1]` holds the k-itemsets.
pub fn group_by_level<I>(itemsets: I) -> Vec<FrequentLevel>
where
    I: IntoIterator<Item = (Vec<usize>, usize)>,
{
    let mut levels: Vec<FrequentLevel> = Vec::new();

    for (itemset, support) in itemsets {
        let size = itemset.len();
        if size == 0 {
            continue;
        }
        while levels.len() < size {
            levels.push(FrequentLevel::new(levels.len() + 1));
        }
        levels[size - 1].add_itemset(itemset, support);
    }

    levels
}
