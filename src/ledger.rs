//! Coin ledger: counts per coin kind.
//!
//! Maintains the invariant that no count is ever negative. Counts are `u64`
//! and zero entries are never stored, so an absent coin and a zero count are
//! the same thing and equal ledgers compare equal.

use crate::coin::Coin;
use crate::error::LedgerError;
use std::collections::BTreeMap;

/// Direction of a [`CoinLedger::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Add,
    Subtract,
}

/// A bag of coins.
///
/// Used for the till, for tendered coins and for the change handed back.
/// Iteration follows the catalogue order, highest denomination first.
///
/// # Examples
///
/// ```
/// use cash_register::{Coin, CoinLedger};
///
/// let paid = CoinLedger::new().with(Coin::TwoEuro, 1).with(Coin::OneEuro, 2);
/// assert_eq!(paid.value(), 400);
/// assert_eq!(paid.coin_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinLedger {
    counts: BTreeMap<Coin, u64>,
}

impl CoinLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        CoinLedger {
            counts: BTreeMap::new(),
        }
    }

    /// Creates a ledger holding `count` coins of every kind.
    pub fn uniform(count: u64) -> Self {
        Coin::DESCENDING.into_iter().map(|c| (c, count)).collect()
    }

    /// Returns this ledger with `count` more coins of `coin`.
    ///
    /// Counts saturate at `u64::MAX`. Use [`CoinLedger::add`] where an
    /// overflow has to be reported.
    pub fn with(mut self, coin: Coin, count: u64) -> Self {
        self.put(coin, self.count(coin).saturating_add(count));
        self
    }

    /// Number of coins of one kind.
    pub fn count(&self, coin: Coin) -> u64 {
        self.counts.get(&coin).copied().unwrap_or(0)
    }

    /// Total value in minor units, or `None` if it does not fit in a `u64`.
    pub fn checked_value(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |total, (coin, count)| {
            coin.minor_value()
                .checked_mul(*count)
                .and_then(|value| total.checked_add(value))
        })
    }

    /// Total value in minor units, saturating at `u64::MAX`.
    pub fn value(&self) -> u64 {
        self.checked_value().unwrap_or(u64::MAX)
    }

    /// Total number of coins regardless of kind, saturating at `u64::MAX`.
    pub fn coin_count(&self) -> u64 {
        self.counts.values().fold(0, |total, count| total.saturating_add(*count))
    }

    /// Returns `true` if the ledger holds no coins.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Non-zero entries, highest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (Coin, u64)> + '_ {
        self.counts.iter().map(|(coin, count)| (*coin, *count))
    }

    /// Adds or subtracts every count in `other`.
    ///
    /// All or nothing: when a subtraction would take any count below zero,
    /// or an addition would take it past `u64::MAX`, the ledger is left
    /// exactly as it was.
    pub fn merge(&mut self, other: &CoinLedger, sign: Sign) -> Result<(), LedgerError> {
        let mut working = self.clone();

        for (coin, count) in other.iter() {
            let current = working.count(coin);
            let updated = match sign {
                Sign::Add => current
                    .checked_add(count)
                    .ok_or(LedgerError::CountOverflow {
                        coin,
                        held: current,
                        added: count,
                    })?,
                Sign::Subtract => {
                    current
                        .checked_sub(count)
                        .ok_or(LedgerError::InsufficientCoins {
                            coin,
                            available: current,
                            requested: count,
                        })?
                }
            };
            working.put(coin, updated);
        }

        *self = working;
        Ok(())
    }

    /// Adds every count in `other`, all or nothing.
    pub fn add(&mut self, other: &CoinLedger) -> Result<(), LedgerError> {
        self.merge(other, Sign::Add)
    }

    /// Subtracts every count in `other`, all or nothing.
    pub fn subtract(&mut self, other: &CoinLedger) -> Result<(), LedgerError> {
        self.merge(other, Sign::Subtract)
    }

    fn put(&mut self, coin: Coin, count: u64) {
        if count == 0 {
            self.counts.remove(&coin);
        } else {
            self.counts.insert(coin, count);
        }
    }
}

impl FromIterator<(Coin, u64)> for CoinLedger {
    fn from_iter<I: IntoIterator<Item = (Coin, u64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CoinLedger::new(), |ledger, (coin, count)| {
                ledger.with(coin, count)
            })
    }
}

impl From<BTreeMap<Coin, u64>> for CoinLedger {
    fn from(map: BTreeMap<Coin, u64>) -> Self {
        map.into_iter().collect()
    }
}
