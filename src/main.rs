use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use branch_sales::{Axis, Config, Dimension, Error};
use clap::Parser;
use log::debug;

/// Validates the daily sales record files in a directory and writes the
/// total sales per branch (and optionally per commodity).
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Directory holding branch.lst and the NNNNNNNN.rcd record files
    directory: Option<PathBuf>,

    /// Also aggregate by commodity, using commodity.lst
    #[arg(long)]
    commodities: bool,

    /// Regular expression a branch code must match in full
    #[arg(long, value_name = "REGEX", value_parser = valid_pattern)]
    branch_pattern: Option<String>,

    /// Regular expression a commodity code must match in full
    #[arg(long, value_name = "REGEX", value_parser = valid_pattern, requires = "commodities")]
    commodity_pattern: Option<String>,

    /// Rewrite the summary files after every record file
    #[arg(long)]
    checkpoint: bool,

    /// Log level for diagnostics on standard error
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: String,
}

impl Args {
    fn config(&self) -> Result<Config, Error> {
        let directory = self.directory.clone().ok_or(Error::MissingArgument)?;
        let mut config = Config::new(directory).with_checkpoint(self.checkpoint);
        if self.commodities {
            config = config.with_commodities();
        }
        if let Some(pattern) = &self.branch_pattern {
            config = config.with_pattern(Axis::Branch, pattern);
        }
        if let Some(pattern) = &self.commodity_pattern {
            config = config.with_pattern(Axis::Commodity, pattern);
        }
        Ok(config)
    }
}

/// Accepts `s` only if it compiles the way a run will compile it.
fn valid_pattern(s: &str) -> Result<String, Error> {
    Dimension::branch().with_pattern(s).code_regex()?;
    Ok(s.to_string())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .try_init()?;
    debug!("{args:?}");
    match args.config().and_then(|config| branch_sales::run(&config)) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!("{e:?}");
            println!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
