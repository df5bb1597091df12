use thiserror::Error;

/// Everything that can stop a run.
///
/// Every error is terminal: the run aborts at the first one and nothing
/// further is read or written. The [`Display`](std::fmt::Display) text is the
/// single line shown to the user.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no directory given")]
    MissingArgument,
    #[error("{master} definition file does not exist")]
    MasterFileNotFound { master: &'static str },
    #[error("{master} definition file has an invalid format")]
    InvalidMasterFormat { master: &'static str },
    #[error("sales file names are not sequential")]
    NonSequentialFileNames,
    #[error("{file} has an invalid format")]
    InvalidRecordFormat { file: String },
    #[error("{file} has an invalid branch code")]
    UnknownBranchCode { file: String },
    #[error("{file} has an invalid commodity code")]
    UnknownCommodityCode { file: String },
    #[error("total amount exceeded 10 digits")]
    TotalAmountOverflow,
    #[error("an unexpected error occurred")]
    NonNumericAmount { file: String },
    #[error("an unexpected error occurred")]
    InvalidAmount(#[from] std::num::ParseIntError),
    #[error("an unexpected error occurred")]
    InvalidPattern(#[from] regex::Error),
    #[error("an unexpected error occurred")]
    Io(#[from] std::io::Error),
    #[error("an unexpected error occurred")]
    Write {
        file: String,
        #[source]
        source: csv::Error,
    },
}

/// The category of an [`Error`], independent of the file it concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MissingArgument,
    MasterFileNotFound,
    InvalidMasterFormat,
    NonSequentialFileNames,
    InvalidRecordFormat,
    UnknownBranchCode,
    UnknownCommodityCode,
    TotalAmountOverflow,
    Unexpected,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArgument => ErrorKind::MissingArgument,
            Self::MasterFileNotFound { .. } => ErrorKind::MasterFileNotFound,
            Self::InvalidMasterFormat { .. } => ErrorKind::InvalidMasterFormat,
            Self::NonSequentialFileNames => ErrorKind::NonSequentialFileNames,
            Self::InvalidRecordFormat { .. } => ErrorKind::InvalidRecordFormat,
            Self::UnknownBranchCode { .. } => ErrorKind::UnknownBranchCode,
            Self::UnknownCommodityCode { .. } => ErrorKind::UnknownCommodityCode,
            Self::TotalAmountOverflow => ErrorKind::TotalAmountOverflow,
            Self::NonNumericAmount { .. }
            | Self::InvalidAmount(_)
            | Self::InvalidPattern(_)
            | Self::Io(_)
            | Self::Write { .. } => ErrorKind::Unexpected,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
