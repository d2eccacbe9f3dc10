use thiserror::Error;

/// Error type that captures failures across storage, decoding, and input
/// validation.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Stored data is corrupt: {0}")]
    DataCorruption(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}
