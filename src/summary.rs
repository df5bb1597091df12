use log::info;
use serde::Serialize;

use std::path::Path;

use crate::{Amount, Error, Ledger, Result};

/// One line of a summary file.
#[derive(Debug, Serialize)]
struct Row<'a> {
    code: &'a str,
    name: &'a str,
    total: Amount,
}

impl Ledger {
    /// Writes this ledger's totals to its output file in `directory`,
    /// replacing any existing file.
    ///
    /// The output has one line per code, in ascending code order, in the
    /// following format:
    ///
    /// ```txt
    /// CODE,NAME,TOTAL
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any errors from creating, writing, or flushing the file.
    pub fn write_summary(&self, directory: impl AsRef<Path>) -> Result<()> {
        let path = directory.as_ref().join(self.dimension().output_file());
        let fail = |source| Error::Write {
            file: self.dimension().output_file().to_string(),
            source,
        };
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(&path)
            .map_err(fail)?;
        for (code, tally) in self.iter() {
            wtr.serialize(Row {
                code,
                name: &tally.name,
                total: tally.total,
            })
            .map_err(fail)?;
        }
        wtr.flush().map_err(|e| fail(e.into()))?;
        info!("wrote {} lines to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{Dimension, ErrorKind};

    use super::*;

    #[test]
    fn write_summary_fn_writes_one_line_per_code() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::load("testdata/basic", Dimension::branch()).unwrap();
        ledger.set_total("002", Amount::new(2000));
        ledger.write_summary(dir.path()).unwrap();
        let out = fs::read_to_string(dir.path().join("branch.out")).unwrap();
        assert_eq!(out, "001,Tokyo,0\n002,Osaka,2000\n003,Nagoya,0\n");
    }

    #[test]
    fn write_summary_fn_replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("commodity.out"),
            "stale\nstale\nstale\nstale\n",
        )
        .unwrap();
        let ledger = Ledger::load("testdata/commodities", Dimension::commodity()).unwrap();
        ledger.write_summary(dir.path()).unwrap();
        let out = fs::read_to_string(dir.path().join("commodity.out")).unwrap();
        assert_eq!(out, "SFT00001,Office suite,0\nSFT00002,\"Quoted\" tools,0\n");
    }

    #[test]
    fn write_summary_fn_writes_empty_file_for_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        Ledger::new(Dimension::branch())
            .write_summary(dir.path())
            .unwrap();
        let out = fs::read_to_string(dir.path().join("branch.out")).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn write_summary_fn_returns_unexpected_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(Dimension::branch());
        let err = ledger.write_summary(dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(matches!(err, Error::Write { ref file, .. } if file == "branch.out"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_summary_fn_names_output_file_when_flush_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink("/dev/full", dir.path().join("branch.out")).unwrap();
        let ledger = Ledger::load("testdata/basic", Dimension::branch()).unwrap();
        let err = ledger.write_summary(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(matches!(err, Error::Write { ref file, .. } if file == "branch.out"));
    }
}
