use super::error::MiningError;

/// Thresholds for one mining run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningConfig {
    /// Absolute number of transactions an itemset must occur in.
    pub min_support: usize,
    /// Longest itemset to report; `None` means unbounded.
    pub max_len: Option<usize>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 1,
            max_len: None,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: usize) -> Self {
        Self {
            min_support,
            max_len: None,
        }
    }

    /// Converts a fractional support into an absolute count, rounding up so
    /// that no itemset below the requested fraction is accepted.
    pub fn from_fraction(min_support: f64, num_transactions: usize) -> Result<Self, MiningError> {
        if !(min_support > 0.0 && min_support <= 1.0) {
            return Err(MiningError::InvalidRelativeSupport(min_support));
        }
        let min_count = (min_support * num_transactions as f64).ceil() as usize;
        Ok(Self::new(min_count.max(1)))
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn validate(&self) -> Result<(), MiningError> {
        if self.min_support == 0 {
            return Err(MiningError::InvalidMinimumSupport);
        }
        if self.max_len == Some(0) {
            return Err(MiningError::InvalidMaxLen);
        }
        Ok(())
    }
}
