//! The cash register: one till, one transaction at a time.
//!
//! Every sale runs inside the till lock. The change search works on a
//! scratch ledger and the till is replaced only once change has been found,
//! so a rejected sale leaves the till exactly as it was.

use crate::change::find_change;
use crate::config::{CapPolicy, RegisterConfig};
use crate::error::RegisterError;
use crate::ledger::CoinLedger;
use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A till of coins that sells against exact change.
///
/// `transact` takes `&self`; wrap the register in an `Arc` to share it
/// between checkout threads. Sales are serialized on the till lock.
///
/// # Examples
///
/// ```
/// use cash_register::{CashRegister, Coin, CoinLedger, RegisterConfig};
///
/// let register = CashRegister::with_till(CoinLedger::uniform(20), RegisterConfig::default());
/// let change = register
///     .transact(80, &CoinLedger::new().with(Coin::OneEuro, 1))
///     .unwrap();
///
/// assert_eq!(change, CoinLedger::new().with(Coin::TwentyCent, 1));
/// ```
#[derive(Debug)]
pub struct CashRegister {
    till: Mutex<CoinLedger>,
    config: RegisterConfig,
}

impl CashRegister {
    /// Creates a register with an empty till.
    pub fn new(config: RegisterConfig) -> Self {
        Self::with_till(CoinLedger::new(), config)
    }

    /// Creates a register seeded with a float.
    pub fn with_till(till: CoinLedger, config: RegisterConfig) -> Self {
        CashRegister {
            till: Mutex::new(till),
            config,
        }
    }

    /// Cap policy and search strategy this register was built with.
    pub fn config(&self) -> RegisterConfig {
        self.config
    }

    /// Sells goods worth `price` minor units for the `tendered` coins.
    ///
    /// Returns the change handed back, empty on exact payment. On any error
    /// the till is untouched, including when the tendered coins or the till
    /// holding them would be worth more than a `u64` can count.
    pub fn transact(&self, price: i64, tendered: &CoinLedger) -> Result<CoinLedger, RegisterError> {
        let mut till = self.lock();

        if price <= 0 {
            return Err(RegisterError::InvalidPrice { price });
        }
        let tendered_value = tendered
            .checked_value()
            .ok_or(RegisterError::ValueOverflow)?;
        // price is positive here, so the conversion is lossless
        let price_value = price.unsigned_abs();
        if tendered_value < price_value {
            return Err(RegisterError::InsufficientPayment {
                tendered: tendered_value,
                price,
            });
        }

        // till plus tendered must stay countable for both commit paths
        let mut scratch = till.clone();
        scratch
            .add(tendered)
            .map_err(|_| RegisterError::ValueOverflow)?;
        if scratch.checked_value().is_none() {
            return Err(RegisterError::ValueOverflow);
        }

        let owed = tendered_value - price_value;
        if owed == 0 {
            *till = scratch;
            debug!("Exact payment of {}, till now {}", price, till.value());
            return Ok(CoinLedger::new());
        }

        let caps = match self.config.cap_policy {
            CapPolicy::TillStock => &*till,
            CapPolicy::TillAndTendered => &scratch,
        };
        let change = find_change(owed, caps, self.config.strategy)
            .ok_or(RegisterError::NoExactChange { change: owed })?;

        scratch.subtract(&change)?;
        *till = scratch;

        debug!(
            "Sold for {}, returned {} in {} coins, till now {}",
            price,
            change.value(),
            change.coin_count(),
            till.value()
        );

        Ok(change)
    }

    /// Current value of the till in minor units.
    pub fn till_value(&self) -> u64 {
        self.lock().value()
    }

    /// Snapshot of the till contents.
    pub fn till(&self) -> CoinLedger {
        self.lock().clone()
    }

    // The till is only ever replaced wholesale, so a poisoned lock still
    // guards a consistent ledger.
    fn lock(&self) -> MutexGuard<'_, CoinLedger> {
        self.till.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CashRegister {
    fn default() -> Self {
        Self::new(RegisterConfig::default())
    }
}
