use thiserror::Error;

/// Why a single input line was not turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("expected at least 4 fields, found {0}")]
    TooFewFields(usize),
    #[error("empty sector name")]
    EmptySector,
    #[error("amount is not a finite number: {0:?}")]
    InvalidAmount(String),
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
    #[error("unreadable line: {0}")]
    Unreadable(String),
}

/// Failure to read or write an exported record document.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid data format: {0}")]
    InvalidFormat(String),
}
