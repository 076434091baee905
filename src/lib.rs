//! FP-growth frequent itemset mining.
//!
//! Transactions are compressed into an arena-backed [`FPTree`] and mined by
//! walking conditional trees depth-first:
//!
//! ```
//! use fp_growth_rs::frequent_itemsets;
//!
//! let transactions = vec![vec!["a", "b", "c"], vec!["a", "b", "d"], vec!["a", "d", "e"]];
//! let mut found: Vec<_> = frequent_itemsets(transactions, 2)
//!     .unwrap()
//!     .map(|(mut itemset, support)| {
//!         itemset.sort();
//!         (itemset, support)
//!     })
//!     .collect();
//! found.sort();
//!
//! assert!(found.contains(&(vec!["a"], 3)));
//! assert!(found.contains(&(vec!["a", "b"], 2)));
//! ```

pub mod fp;

pub use fp::{
    frequent_itemsets, mine, FPNode, FPTree, FrequentItemsets, FrequentLevel, Itemset,
    MiningConfig, MiningError, NodeId, TreeError,
};

#[cfg(feature = "python")]
mod python {
    use crate::fp::{fp_growth_with_config, MiningConfig};
    use numpy::ndarray::{Array1, Array2};
    use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    type Levels<'py> = (Vec<Bound<'py, PyArray2<usize>>>, Vec<Bound<'py, PyArray1<usize>>>);

    #[pyfunction]
    #[pyo3(name = "fp_growth", signature = (transactions, min_support, max_len = None))]
    fn fp_growth_py<'py>(
        py: Python<'py>,
        transactions: PyReadonlyArray2<'py, i32>,
        min_support: f64,
        max_len: Option<usize>,
    ) -> PyResult<Levels<'py>> {
        let transactions_view = transactions.as_array();
        let mut config = MiningConfig::from_fraction(min_support, transactions_view.nrows())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        config.max_len = max_len;

        let frequent_levels = fp_growth_with_config(transactions_view, &config)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        let mut itemsets = Vec::new();
        let mut supports = Vec::new();

        for level in frequent_levels {
            if level.is_empty() {
                continue;
            }

            let itemset_size = level.itemset_size;
            let num_itemsets = level.len();
            let mut data = vec![0usize; num_itemsets * itemset_size];

            for (i, itemset) in level.iter_itemsets().enumerate() {
                for (j, &item) in itemset.iter().enumerate() {
                    data[i * itemset_size + j] = item;
                }
            }

            let array = Array2::from_shape_vec((num_itemsets, itemset_size), data)
                .map_err(|_| PyValueError::new_err("Failed to create array"))?;

            itemsets.push(array.into_pyarray(py));
            supports.push(Array1::from_vec(level.supports().to_vec()).into_pyarray(py));
        }

        Ok((itemsets, supports))
    }

    #[pymodule]
    fn fp_growth_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(fp_growth_py, m)?)?;
        Ok(())
    }
}
