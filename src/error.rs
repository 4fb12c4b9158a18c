//! Error types for the cash register.

use crate::coin::Coin;
use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// A ledger operation whose result a `u64` count cannot represent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Subtraction would leave a negative count for `coin`
    #[error("cannot remove {requested} x {coin}: only {available} in ledger")]
    InsufficientCoins {
        coin: Coin,
        available: u64,
        requested: u64,
    },

    /// Addition would push the count for `coin` past `u64::MAX`
    #[error("cannot add {added} x {coin} to {held}: count overflows")]
    CountOverflow { coin: Coin, held: u64, added: u64 },
}

/// Reasons a sale is rejected by the register.
///
/// All but `InvariantViolation` are business outcomes the caller is
/// expected to handle.
/// `InvariantViolation` means the register itself is broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// Price was zero or negative
    #[error("price must be positive, got {price}")]
    InvalidPrice { price: i64 },

    /// Tendered coins are worth less than the price
    #[error("paid too little: tendered {tendered}, price {price}")]
    InsufficientPayment { tendered: u64, price: i64 },

    /// No combination of available coins adds up to the change owed
    #[error("no exact change available for {change}")]
    NoExactChange { change: u64 },

    /// Tendered coins, or the till once they are added, are worth more than
    /// a `u64` of minor units can count
    #[error("tendered coins overflow the till's countable value")]
    ValueOverflow,

    /// Internal ledger arithmetic failed
    #[error("till invariant violated: {0}")]
    InvariantViolation(#[from] LedgerError),
}

/// A price string that does not map onto whole minor units.
#[derive(Error, Debug)]
pub enum AmountError {
    /// Not a decimal number
    #[error("invalid amount: {0}")]
    Parse(#[from] rust_decimal::Error),

    /// More fractional digits than the currency has minor units for
    #[error("amount {0} has more than two decimal places")]
    TooPrecise(String),

    /// Does not fit in the minor-unit integer range
    #[error("amount {0} is out of range")]
    OutOfRange(String),
}

/// Errors that can occur while driving the register from files.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid purchase or float record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Coin label not in the catalogue
    #[error("Unknown coin label {0:?}")]
    UnknownCoin(String),

    /// The register broke its own invariant; processing cannot continue
    #[error("Register failure: {0}")]
    Register(#[from] RegisterError),
}
