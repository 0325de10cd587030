//! Error type shared by the dataset loader, the fetcher and the aggregator.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument violates the operation's contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A trip row is missing a required field or holds an unparsable value.
    /// `record` is the 1-based data row (header excluded).
    #[error("malformed input at record {record}: {reason}")]
    MalformedInput { record: u64, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl Error {
    pub fn malformed(record: u64, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            record,
            reason: reason.into(),
        }
    }
}
