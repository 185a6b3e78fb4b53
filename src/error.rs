use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid number in '{field}': {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid {name}: {value} (must be a positive finite number)")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
