//! Checkout engine: replays a CSV of purchases through one register.
//!
//! Rows are streamed one at a time. Bad rows are logged and skipped;
//! rejected sales are recorded as outcomes so the output lines up with the
//! input.

use crate::coin::Coin;
use crate::config::RegisterConfig;
use crate::error::{EngineError, Result};
use crate::ledger::CoinLedger;
use crate::register::CashRegister;
use crate::transaction::{FloatRecord, OutcomeKind, Purchase, PurchaseRecord, SaleOutcome};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::collections::HashSet;
use std::io::{Read, Write};

/// Drives a [`CashRegister`] from CSV input.
///
/// # Output Ordering
///
/// Outcomes are written in the order the purchases were processed, which is
/// the order they appear in the input.
pub struct CheckoutEngine {
    register: CashRegister,

    /// Outcomes of every accepted row, in processing order.
    outcomes: Vec<SaleOutcome>,

    /// Purchase IDs already seen, for duplicate detection.
    seen: HashSet<u32>,
}

impl CheckoutEngine {
    /// Creates an engine around a register with the given float.
    pub fn new(float: CoinLedger, config: RegisterConfig) -> Self {
        CheckoutEngine {
            register: CashRegister::with_till(float, config),
            outcomes: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Reads a `coin,count` float file into a ledger.
    ///
    /// Unlike purchases, a bad float row is an error: trading on a till
    /// that was only partly loaded would be wrong from the first sale.
    pub fn read_float<R: Read>(reader: R) -> Result<CoinLedger> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut float = CoinLedger::new();

        for (row_idx, result) in csv_reader.deserialize::<FloatRecord>().enumerate() {
            let row = row_idx + 2; // 1-indexed, accounting for header row
            let (coin, count) = result?.parse().map_err(|e| EngineError::InvalidRecord {
                row,
                message: e.to_string(),
            })?;
            float
                .add(&CoinLedger::new().with(coin, count))
                .map_err(|e| EngineError::InvalidRecord {
                    row,
                    message: e.to_string(),
                })?;
        }

        Ok(float)
    }

    /// Processes purchases from a CSV reader in streaming fashion.
    ///
    /// Invalid records and duplicate IDs are logged at warn level and
    /// skipped. Only a broken till invariant aborts processing.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<PurchaseRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    continue;
                }
            };

            match record.parse(row_num) {
                Ok(purchase) => self.process_purchase(purchase, row_num)?,
                Err(e) => warn!("Row {}: {}", row_num, e),
            }
        }

        Ok(())
    }

    /// Runs one purchase through the register and records the outcome.
    fn process_purchase(&mut self, purchase: Purchase, row: usize) -> Result<()> {
        if !self.seen.insert(purchase.tx_id) {
            warn!(
                "Row {}: Duplicate purchase ID {}, ignoring",
                row, purchase.tx_id
            );
            return Ok(());
        }

        let outcome = match self.register.transact(purchase.price, &purchase.tendered) {
            Ok(change) => SaleOutcome {
                tx_id: purchase.tx_id,
                kind: OutcomeKind::Ok,
                change,
            },
            Err(e) => {
                let Some(kind) = OutcomeKind::from_rejection(&e) else {
                    return Err(e.into());
                };
                debug!("Row {}: Purchase {} rejected: {}", row, purchase.tx_id, e);
                SaleOutcome {
                    tx_id: purchase.tx_id,
                    kind,
                    change: CoinLedger::new(),
                }
            }
        };

        self.outcomes.push(outcome);
        Ok(())
    }

    /// Writes one row per processed purchase with the change handed back.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["tx", "outcome"];
        header.extend(Coin::DESCENDING.iter().map(|c| c.label()));
        csv_writer.write_record(&header)?;

        for outcome in &self.outcomes {
            let mut row = vec![outcome.tx_id.to_string(), outcome.kind.label().to_string()];
            row.extend(
                Coin::DESCENDING
                    .iter()
                    .map(|coin| outcome.change.count(*coin).to_string()),
            );
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the till as `coin,count` rows, one per coin kind.
    pub fn write_till<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["coin", "count"])?;

        let till = self.register.till();
        for coin in Coin::DESCENDING {
            csv_writer.write_record([coin.label().to_string(), till.count(coin).to_string()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// The register purchases are replayed through.
    pub fn register(&self) -> &CashRegister {
        &self.register
    }

    /// Outcomes recorded so far, in input order.
    pub fn outcomes(&self) -> &[SaleOutcome] {
        &self.outcomes
    }
}

impl Default for CheckoutEngine {
    fn default() -> Self {
        Self::new(CoinLedger::new(), RegisterConfig::default())
    }
}
