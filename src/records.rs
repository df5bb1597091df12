use log::{debug, info};
use regex::Regex;

use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::{Error, Result};

const RECORD_FILE_PATTERN: &str = r"^([0-9]{8})\.rcd$";

/// A daily sales record file found by [`discover`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordFile {
    name: String,
    serial: u32,
    path: PathBuf,
}

impl RecordFile {
    /// The file's base name, such as `00000001.rcd`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number formed by the eight leading digits of the name.
    #[must_use]
    pub fn serial(&self) -> u32 {
        self.serial
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file, returning its lines without terminators.
    ///
    /// # Errors
    ///
    /// Returns any errors from opening or reading the file.
    pub fn lines(&self) -> Result<Vec<String>> {
        let file = BufReader::new(File::open(&self.path)?);
        Ok(file.lines().collect::<std::io::Result<_>>()?)
    }
}

/// Finds the sales record files in `directory`, in ascending order.
///
/// A record file is a regular file whose name is exactly eight digits
/// followed by `.rcd`. Anything else in the directory is ignored. No file
/// contents are read.
///
/// # Errors
///
/// Returns errors if:
/// * The directory cannot be listed
/// * The record files' numbers do not form an unbroken sequence, each one
///   greater than the last ([`Error::NonSequentialFileNames`])
pub fn discover(directory: impl AsRef<Path>) -> Result<Vec<RecordFile>> {
    let pattern = Regex::new(RECORD_FILE_PATTERN)?;
    let mut records = Vec::new();
    for entry in fs::read_dir(&directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(caps) = pattern.captures(name) else {
            continue;
        };
        let serial: u32 = caps[1].parse()?;
        debug!("found record file {name}");
        records.push(RecordFile {
            name: name.to_string(),
            serial,
            path,
        });
    }
    records.sort_by(|a, b| a.name.cmp(&b.name));
    check_sequence(&records)?;
    info!(
        "found {} record files in {}",
        records.len(),
        directory.as_ref().display()
    );
    Ok(records)
}

fn check_sequence(records: &[RecordFile]) -> Result<()> {
    if records
        .windows(2)
        .all(|pair| pair[1].serial.checked_sub(pair[0].serial) == Some(1))
    {
        Ok(())
    } else {
        Err(Error::NonSequentialFileNames)
    }
}
