use log::debug;
use regex::Regex;

use crate::{Amount, Axis, Error, Ledger, RecordFile, Result};

const AMOUNT_PATTERN: &str = "^[0-9]*$";

/// Adds the amounts from record files to the running totals of one or more
/// [`Ledger`]s.
///
/// Each record file holds one code per ledger, in the same order as the
/// ledgers, followed by the amount. The amount is added, in full, to the
/// total for each code.
#[derive(Debug)]
pub struct Aggregator {
    ledgers: Vec<Ledger>,
    amount_pattern: Regex,
}

impl Aggregator {
    /// Creates an aggregator over `ledgers`.
    ///
    /// # Errors
    ///
    /// Returns any errors from compiling the amount pattern.
    pub fn new(ledgers: Vec<Ledger>) -> Result<Self> {
        Ok(Self {
            ledgers,
            amount_pattern: Regex::new(AMOUNT_PATTERN)?,
        })
    }

    #[must_use]
    pub fn ledgers(&self) -> &[Ledger] {
        &self.ledgers
    }

    #[must_use]
    pub fn into_ledgers(self) -> Vec<Ledger> {
        self.ledgers
    }

    /// Reads `record` and adds its amount to the ledgers.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file cannot be read
    /// * The file does not have exactly one line per ledger plus one
    ///   ([`Error::InvalidRecordFormat`])
    /// * A code is unknown to its ledger ([`Error::UnknownBranchCode`],
    ///   [`Error::UnknownCommodityCode`])
    /// * The amount is not a non-negative integer
    /// * Any new total would have more than ten digits
    ///   ([`Error::TotalAmountOverflow`])
    ///
    /// On error, no totals are changed.
    pub fn process(&mut self, record: &RecordFile) -> Result<()> {
        let lines = record.lines()?;
        self.add(record.name(), &lines)
    }

    /// Validates the lines of the record file `file` and adds its amount to
    /// the ledgers.
    ///
    /// # Errors
    ///
    /// As for [`Aggregator::process`], apart from read errors.
    pub fn add(&mut self, file: &str, lines: &[String]) -> Result<()> {
        let Some((amount, codes)) = lines.split_last() else {
            return Err(Error::InvalidRecordFormat { file: file.into() });
        };
        if codes.len() != self.ledgers.len() {
            return Err(Error::InvalidRecordFormat { file: file.into() });
        }
        for (ledger, code) in self.ledgers.iter().zip(codes) {
            if !ledger.contains(code) {
                return Err(unknown_code(ledger.dimension().axis(), file));
            }
        }
        if !self.amount_pattern.is_match(amount) {
            return Err(Error::NonNumericAmount { file: file.into() });
        }
        let amount: Amount = amount.parse()?;

        let mut updated = Vec::with_capacity(codes.len());
        for (ledger, code) in self.ledgers.iter().zip(codes) {
            let total = ledger
                .total(code)
                .and_then(|t| t.checked_add(amount))
                .ok_or(Error::TotalAmountOverflow)?;
            updated.push(total);
        }
        for ((ledger, code), total) in self.ledgers.iter_mut().zip(codes).zip(updated) {
            ledger.set_total(code, total);
        }
        debug!("{file}: added {amount} for {}", codes.join(","));
        Ok(())
    }
}

fn unknown_code(axis: Axis, file: &str) -> Error {
    let file = file.to_string();
    match axis {
        Axis::Branch => Error::UnknownBranchCode { file },
        Axis::Commodity => Error::UnknownCommodityCode { file },
    }
}
