//! Register configuration.
//!
//! The defaults model a real drawer: change comes only from coins that were
//! already in the till, found by a single greedy pass.

use clap::ValueEnum;

/// Which stock bounds the number of coins of one kind the till may hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CapPolicy {
    /// Only coins the till held before the sale may be returned.
    #[default]
    TillStock,
    /// Coins just tendered may come straight back as change.
    TillAndTendered,
}

/// How the register looks for an exact change combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchStrategy {
    /// One pass from the highest denomination down, no backtracking.
    #[default]
    Greedy,
    /// Tries every affordable count, highest denomination first, and finds
    /// change whenever the stock can pay it exactly.
    Exhaustive,
}

/// Settings for a [`CashRegister`](crate::CashRegister).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterConfig {
    pub cap_policy: CapPolicy,
    pub strategy: SearchStrategy,
}

impl RegisterConfig {
    pub fn new(cap_policy: CapPolicy, strategy: SearchStrategy) -> Self {
        RegisterConfig {
            cap_policy,
            strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_till_stock_greedy() {
        let config = RegisterConfig::default();
        assert_eq!(config.cap_policy, CapPolicy::TillStock);
        assert_eq!(config.strategy, SearchStrategy::Greedy);
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(
            CapPolicy::from_str("till-and-tendered", true).unwrap(),
            CapPolicy::TillAndTendered
        );
        assert_eq!(
            SearchStrategy::from_str("exhaustive", true).unwrap(),
            SearchStrategy::Exhaustive
        );
    }
}
