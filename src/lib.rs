//! # Cash Register
//!
//! A coin till that sells goods for tendered coins and hands back exact
//! change, or rejects the sale and leaves the till untouched.
//!
//! ## Design Principles
//!
//! - **Integer minor units**: all values are whole cents
//! - **Non-negative ledgers**: coin counts can never go below zero
//! - **Atomic sales**: change is searched on a scratch copy, the till is
//!   replaced only on success
//! - **Serialized access**: one sale at a time per till, behind a mutex
//!
//! ## Example
//!
//! ```
//! use cash_register::{CashRegister, Coin, CoinLedger, RegisterConfig, RegisterError};
//!
//! let register = CashRegister::with_till(CoinLedger::uniform(20), RegisterConfig::default());
//!
//! let paid = CoinLedger::new().with(Coin::OneEuro, 1);
//! let change = register.transact(60, &paid).unwrap();
//! assert_eq!(change, CoinLedger::new().with(Coin::TwentyCent, 2));
//!
//! let err = register.transact(0, &paid).unwrap_err();
//! assert!(matches!(err, RegisterError::InvalidPrice { .. }));
//! ```

pub mod amount;
pub mod change;
pub mod coin;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod register;
pub mod transaction;

pub use coin::Coin;
pub use config::{CapPolicy, RegisterConfig, SearchStrategy};
pub use engine::CheckoutEngine;
pub use error::{AmountError, EngineError, LedgerError, RegisterError, Result};
pub use ledger::{CoinLedger, Sign};
pub use register::CashRegister;
pub use transaction::{OutcomeKind, Purchase, PurchaseRecord, SaleOutcome};
