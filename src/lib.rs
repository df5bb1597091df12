#![doc = include_str!("../README.md")]
use log::info;

use std::path::{Path, PathBuf};

mod aggregate;
mod amount;
mod dimension;
mod error;
mod master;
mod records;
mod summary;

pub use aggregate::Aggregator;
pub use amount::Amount;
pub use dimension::{Axis, Dimension};
pub use error::{Error, ErrorKind, Result};
pub use master::{Ledger, Tally};
pub use records::{discover, RecordFile};

/// Settings for one run over a directory.
///
/// To aggregate by branch only, use [`Config::new`]. To also aggregate by
/// commodity, add [`Config::with_commodities`].
#[derive(Clone, Debug)]
pub struct Config {
    pub directory: PathBuf,
    pub dimensions: Vec<Dimension>,
    pub checkpoint: bool,
}

impl Config {
    /// Creates a configuration that aggregates the record files in
    /// `directory` by branch.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            dimensions: vec![Dimension::branch()],
            checkpoint: false,
        }
    }

    /// Adds the commodity dimension, so that each record file carries a
    /// commodity code after its branch code.
    #[must_use]
    pub fn with_commodities(mut self) -> Self {
        self.dimensions.push(Dimension::commodity());
        self
    }

    /// Replaces the code pattern of the `axis` dimension, if there is one.
    ///
    /// See [`Dimension::with_pattern`].
    #[must_use]
    pub fn with_pattern(mut self, axis: Axis, pattern: &str) -> Self {
        for dim in self.dimensions.iter_mut().filter(|d| d.axis() == axis) {
            *dim = dim.clone().with_pattern(pattern);
        }
        self
    }

    /// If `checkpoint` is true, the summaries are rewritten after every
    /// record file, not just at the end.
    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: bool) -> Self {
        self.checkpoint = checkpoint;
        self
    }
}

/// Validates and aggregates the files in `config.directory`, writing one
/// summary file per dimension.
///
/// The masters are loaded first, in order, then all record files are found
/// and checked for sequence, then each is added in ascending order. The run
/// stops at the first error, and summaries are written only from totals that
/// passed every check.
///
/// Returns the ledgers holding the final totals.
///
/// # Errors
///
/// Returns the first error met by any step; see [`Ledger::read_master`],
/// [`discover`], [`Aggregator::process`], and [`Ledger::write_summary`].
pub fn run(config: &Config) -> Result<Vec<Ledger>> {
    let directory = &config.directory;
    let ledgers = config
        .dimensions
        .iter()
        .map(|dim| Ledger::load(directory, dim.clone()))
        .collect::<Result<Vec<_>>>()?;
    let records = discover(directory)?;
    let mut aggregator = Aggregator::new(ledgers)?;
    for record in &records {
        aggregator.process(record)?;
        if config.checkpoint {
            write_summaries(directory, aggregator.ledgers())?;
        }
    }
    write_summaries(directory, aggregator.ledgers())?;
    info!("aggregated {} record files", records.len());
    Ok(aggregator.into_ledgers())
}

fn write_summaries(directory: &Path, ledgers: &[Ledger]) -> Result<()> {
    for ledger in ledgers {
        ledger.write_summary(directory)?;
    }
    Ok(())
}
