//! CSV record models for purchases, till floats and sale outcomes.

use crate::amount::parse_minor_units;
use crate::coin::Coin;
use crate::error::{EngineError, RegisterError, Result};
use crate::ledger::CoinLedger;
use serde::Deserialize;

/// Raw purchase row as read from CSV.
///
/// Coin columns are optional: a blank cell or a missing column means none
/// of that coin was tendered.
#[derive(Debug, Default, Deserialize)]
pub struct PurchaseRecord {
    /// Purchase ID (unique per file, u32)
    pub tx: u32,

    /// Price in major units, e.g. `0.80`
    pub price: String,

    #[serde(rename = "2e", default)]
    pub two_euro: Option<u64>,
    #[serde(rename = "1e", default)]
    pub one_euro: Option<u64>,
    #[serde(rename = "50c", default)]
    pub fifty_cent: Option<u64>,
    #[serde(rename = "20c", default)]
    pub twenty_cent: Option<u64>,
    #[serde(rename = "10c", default)]
    pub ten_cent: Option<u64>,
    #[serde(rename = "5c", default)]
    pub five_cent: Option<u64>,
    #[serde(rename = "2c", default)]
    pub two_cent: Option<u64>,
    #[serde(rename = "1c", default)]
    pub one_cent: Option<u64>,
}

impl PurchaseRecord {
    /// Converts the raw row into a typed purchase.
    pub fn parse(&self, row: usize) -> Result<Purchase> {
        let price = parse_minor_units(&self.price).map_err(|e| EngineError::InvalidRecord {
            row,
            message: e.to_string(),
        })?;

        Ok(Purchase {
            tx_id: self.tx,
            price,
            tendered: self.tendered(),
        })
    }

    fn tendered(&self) -> CoinLedger {
        [
            (Coin::TwoEuro, self.two_euro),
            (Coin::OneEuro, self.one_euro),
            (Coin::FiftyCent, self.fifty_cent),
            (Coin::TwentyCent, self.twenty_cent),
            (Coin::TenCent, self.ten_cent),
            (Coin::FiveCent, self.five_cent),
            (Coin::TwoCent, self.two_cent),
            (Coin::OneCent, self.one_cent),
        ]
        .into_iter()
        .map(|(coin, count)| (coin, count.unwrap_or(0)))
        .collect()
    }
}

/// A parsed purchase ready for the register.
#[derive(Debug, Clone)]
pub struct Purchase {
    /// Purchase ID
    pub tx_id: u32,

    /// Price in minor units
    pub price: i64,

    /// Coins handed over by the customer
    pub tendered: CoinLedger,
}

/// One `coin,count` row of a till float file.
#[derive(Debug, Deserialize)]
pub struct FloatRecord {
    pub coin: String,
    pub count: u64,
}

impl FloatRecord {
    pub fn parse(&self) -> Result<(Coin, u64)> {
        let coin = self
            .coin
            .parse::<Coin>()
            .map_err(EngineError::UnknownCoin)?;
        Ok((coin, self.count))
    }
}

/// How a purchase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Ok,
    InvalidPrice,
    InsufficientPayment,
    NoExactChange,
    ValueOverflow,
}

impl OutcomeKind {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeKind::Ok => "ok",
            OutcomeKind::InvalidPrice => "invalid_price",
            OutcomeKind::InsufficientPayment => "insufficient_payment",
            OutcomeKind::NoExactChange => "no_exact_change",
            OutcomeKind::ValueOverflow => "value_overflow",
        }
    }

    /// Maps a rejection onto its outcome.
    ///
    /// Returns `None` for an invariant violation, which is not a business
    /// outcome and has to be propagated instead.
    pub fn from_rejection(err: &RegisterError) -> Option<Self> {
        match err {
            RegisterError::InvalidPrice { .. } => Some(OutcomeKind::InvalidPrice),
            RegisterError::InsufficientPayment { .. } => Some(OutcomeKind::InsufficientPayment),
            RegisterError::NoExactChange { .. } => Some(OutcomeKind::NoExactChange),
            RegisterError::ValueOverflow => Some(OutcomeKind::ValueOverflow),
            RegisterError::InvariantViolation(_) => None,
        }
    }
}

/// A processed purchase and the change it produced.
#[derive(Debug, Clone)]
pub struct SaleOutcome {
    pub tx_id: u32,
    pub kind: OutcomeKind,
    /// Empty unless `kind` is `Ok`
    pub change: CoinLedger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_purchase() {
        let record = PurchaseRecord {
            tx: 7,
            price: "0.80".to_string(),
            one_euro: Some(1),
            ..Default::default()
        };

        let purchase = record.parse(2).unwrap();
        assert_eq!(purchase.tx_id, 7);
        assert_eq!(purchase.price, 80);
        assert_eq!(purchase.tendered, CoinLedger::new().with(Coin::OneEuro, 1));
    }

    #[test]
    fn test_parse_purchase_collects_every_column() {
        let record = PurchaseRecord {
            tx: 1,
            price: "3.88".to_string(),
            two_euro: Some(1),
            one_euro: Some(1),
            fifty_cent: Some(1),
            twenty_cent: Some(1),
            ten_cent: Some(1),
            five_cent: Some(1),
            two_cent: Some(1),
            one_cent: Some(1),
        };

        assert_eq!(record.parse(2).unwrap().tendered, CoinLedger::uniform(1));
    }

    #[test]
    fn test_parse_purchase_rejects_bad_price() {
        let record = PurchaseRecord {
            tx: 1,
            price: "1.234".to_string(),
            ..Default::default()
        };

        match record.parse(5) {
            Err(EngineError::InvalidRecord { row, .. }) => assert_eq!(row, 5),
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_float_record() {
        let record = FloatRecord {
            coin: "20c".to_string(),
            count: 19,
        };
        assert_eq!(record.parse().unwrap(), (Coin::TwentyCent, 19));

        let record = FloatRecord {
            coin: "3e".to_string(),
            count: 1,
        };
        assert!(matches!(record.parse(), Err(EngineError::UnknownCoin(_))));
    }

    #[test]
    fn test_outcome_from_rejection() {
        assert_eq!(
            OutcomeKind::from_rejection(&RegisterError::NoExactChange { change: 3 }),
            Some(OutcomeKind::NoExactChange)
        );
        assert_eq!(OutcomeKind::InsufficientPayment.label(), "insufficient_payment");
        assert_eq!(
            OutcomeKind::from_rejection(&RegisterError::ValueOverflow),
            Some(OutcomeKind::ValueOverflow)
        );
        assert_eq!(OutcomeKind::ValueOverflow.label(), "value_overflow");
    }
}
