use log::info;

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{Amount, Dimension, Error, Result};

/// A code's display name and its running total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub name: String,
    pub total: Amount,
}

/// Holds the codes defined for one [`Dimension`], together with their running
/// totals.
///
/// To create a `Ledger` from a master file, use [`Ledger::load`]. To fill an
/// existing one, use [`Ledger::read_master`].
///
/// Codes are kept in ascending order, which is also the order in which they
/// are written out.
#[derive(Clone, Debug)]
pub struct Ledger {
    dimension: Dimension,
    tallies: BTreeMap<String, Tally>,
}

impl Ledger {
    /// Creates an empty ledger for `dimension`.
    #[must_use]
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            tallies: BTreeMap::new(),
        }
    }

    /// Reads the master file for `dimension` from `directory`.
    ///
    /// # Errors
    ///
    /// See [`Ledger::read_master`].
    pub fn load(directory: impl AsRef<Path>, dimension: Dimension) -> Result<Self> {
        let mut ledger = Self::new(dimension);
        ledger.read_master(directory)?;
        Ok(ledger)
    }

    /// Reads code definitions from this ledger's master file in `directory`.
    ///
    /// The master file consists of definitions, one per line, in the
    /// following format:
    ///
    /// ```txt
    /// CODE,NAME
    /// ```
    ///
    /// `CODE` must match the dimension's code pattern. Every code read starts
    /// with a total of zero. If a code is defined more than once, the last
    /// name wins.
    ///
    /// Definitions are added as they are read, so those preceding a bad line
    /// remain in the ledger.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file does not exist ([`Error::MasterFileNotFound`])
    /// * A line does not have exactly two fields, or its code does not match
    ///   the pattern ([`Error::InvalidMasterFormat`])
    /// * The file cannot be opened or read
    /// * The code pattern is an invalid regular expression
    pub fn read_master(&mut self, directory: impl AsRef<Path>) -> Result<()> {
        let master = self.dimension.label();
        let path = directory.as_ref().join(self.dimension.master_file());
        if !path.exists() {
            return Err(Error::MasterFileNotFound { master });
        }
        let pattern = self.dimension.code_regex()?;
        let file = BufReader::new(File::open(&path)?);
        for line in file.lines() {
            let line = line?;
            let fields = split_fields(&line);
            let &[code, name] = &fields[..] else {
                return Err(Error::InvalidMasterFormat { master });
            };
            if !pattern.is_match(code) {
                return Err(Error::InvalidMasterFormat { master });
            }
            self.tallies.insert(
                code.to_string(),
                Tally {
                    name: name.to_string(),
                    total: Amount::default(),
                },
            );
        }
        info!(
            "loaded {} {master} codes from {}",
            self.tallies.len(),
            path.display()
        );
        Ok(())
    }

    #[must_use]
    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.tallies.contains_key(code)
    }

    #[must_use]
    pub fn name(&self, code: &str) -> Option<&str> {
        self.tallies.get(code).map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn total(&self, code: &str) -> Option<Amount> {
        self.tallies.get(code).map(|t| t.total)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Iterates over codes and their tallies, in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tally)> {
        self.tallies.iter().map(|(code, t)| (code.as_str(), t))
    }

    /// Replaces the total for `code`. Unknown codes are ignored.
    pub(crate) fn set_total(&mut self, code: &str, total: Amount) {
        if let Some(tally) = self.tallies.get_mut(code) {
            tally.total = total;
        }
    }
}

/// Splits `line` on commas, dropping any trailing empty fields.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::ErrorKind;

    use super::*;

    fn branch_master(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("branch.lst"), contents).unwrap();
        dir
    }

    #[test]
    fn load_fn_correctly_parses_branch_master() {
        let ledger = Ledger::load("testdata/basic", Dimension::branch()).unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.name("001"), Some("Tokyo"));
        assert_eq!(ledger.name("002"), Some("Osaka"));
        assert_eq!(ledger.name("003"), Some("Nagoya"));
        assert!(ledger.iter().all(|(_, t)| t.total == Amount::default()));
    }

    #[test]
    fn load_fn_correctly_parses_commodity_master() {
        let ledger = Ledger::load("testdata/commodities", Dimension::commodity()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.name("SFT00001"), Some("Office suite"));
        assert_eq!(ledger.total("SFT00002"), Some(Amount::default()));
    }

    #[test]
    fn load_fn_keeps_last_name_for_duplicate_code() {
        let dir = branch_master("001,Tokyo\n002,Osaka\n001,Shinjuku\n");
        let ledger = Ledger::load(dir.path(), Dimension::branch()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.name("001"), Some("Shinjuku"));
        assert_eq!(ledger.total("001"), Some(Amount::default()));
    }

    #[test]
    fn load_fn_accepts_empty_master() {
        let dir = branch_master("");
        let ledger = Ledger::load(dir.path(), Dimension::branch()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn load_fn_returns_not_found_for_missing_master() {
        let dir = tempfile::tempdir().unwrap();
        let err = Ledger::load(dir.path(), Dimension::branch()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MasterFileNotFound);
        let err = Ledger::load(dir.path(), Dimension::commodity()).unwrap_err();
        assert_eq!(err.to_string(), "commodity definition file does not exist");
    }

    #[test]
    fn load_fn_returns_error_for_bad_line_format() {
        for contents in [
            "001,Tokyo,Japan\n",
            "001\n",
            "001,\n",
            "\n",
            "01,Tokyo\n",
            "0001,Tokyo\n",
            "abc,Tokyo\n",
            " 001,Tokyo\n",
        ] {
            let dir = branch_master(contents);
            let err = Ledger::load(dir.path(), Dimension::branch()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidMasterFormat, "{contents:?}");
        }
        let err = Ledger::load("testdata/bad_master", Dimension::branch()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMasterFormat);
    }

    #[test]
    fn load_fn_ignores_trailing_empty_fields() {
        let dir = branch_master("001,Tokyo,,\n");
        let ledger = Ledger::load(dir.path(), Dimension::branch()).unwrap();
        assert_eq!(ledger.name("001"), Some("Tokyo"));
    }

    #[test]
    fn read_master_fn_keeps_entries_before_bad_line() {
        let dir = branch_master("001,Tokyo\nbogus\n002,Osaka\n");
        let mut ledger = Ledger::new(Dimension::branch());
        assert!(ledger.read_master(dir.path()).is_err());
        assert!(ledger.contains("001"));
        assert!(!ledger.contains("002"));
    }

    #[test]
    fn read_master_fn_uses_custom_pattern() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("commodity.lst"), "AB12,Widget\n").unwrap();
        let dim = Dimension::commodity().with_pattern("[A-Z]{2}[0-9]{2}");
        let ledger = Ledger::load(dir.path(), dim).unwrap();
        assert_eq!(ledger.name("AB12"), Some("Widget"));
    }

    #[test]
    fn read_master_fn_returns_unexpected_for_directory_in_place_of_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("branch.lst")).unwrap();
        let err = Ledger::load(dir.path(), Dimension::branch()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn read_master_fn_returns_unexpected_for_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("branch.lst"), b"001,Tokyo\n002,\xff\xfe\n").unwrap();
        let mut ledger = Ledger::new(Dimension::branch());
        let err = ledger.read_master(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(ledger.contains("001"));
        assert!(!ledger.contains("002"));
    }

    #[test]
    fn split_fields_fn_drops_only_trailing_empty_fields() {
        assert_eq!(split_fields("a,,b,,"), vec!["a", "", "b"]);
        assert_eq!(split_fields(",a"), vec!["", "a"]);
        assert!(split_fields("").is_empty());
    }
}
