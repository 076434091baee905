use super::config::MiningConfig;
use super::error::MiningError;
use super::mining::mine;
use super::storage::{group_by_level, FrequentLevel};
use ndarray::ArrayView2;

/// Reads a one-hot transaction matrix: row `i` is transaction `i` and every
/// non-zero column index is an item it contains.
pub fn transactions_from_dense(transactions: ArrayView2<i32>) -> Vec<Vec<usize>> {
    transactions
        .outer_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(_, &flag)| flag != 0)
                .map(|(item, _)| item)
                .collect()
        })
        .collect()
}

/// Mines a one-hot matrix with a fractional `min_support`, grouping the
/// results by itemset size.
pub fn fp_growth_algorithm(
    transactions: ArrayView2<i32>,
    min_support: f64,
) -> Result<Vec<FrequentLevel>, MiningError> {
    let config = MiningConfig::from_fraction(min_support, transactions.nrows())?;
    fp_growth_with_config(transactions, &config)
}

pub fn fp_growth_with_config(
    transactions: ArrayView2<i32>,
    config: &MiningConfig,
) -> Result<Vec<FrequentLevel>, MiningError> {
    let itemsets = mine(transactions_from_dense(transactions), config)?;
    Ok(group_by_level(itemsets))
}
