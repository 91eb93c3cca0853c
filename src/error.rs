use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocError>;

#[derive(Error, Debug)]
pub enum LocError {
    #[error("Data load error: {0}")]
    DataLoad(String),
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("Missing container: {0}")]
    MissingContainer(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl LocError {
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        LocError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }
}

impl From<arboard::Error> for LocError {
    fn from(err: arboard::Error) -> Self {
        LocError::Clipboard(err.to_string())
    }
}
