use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Required column '{0}' not found in header row")]
    MissingColumn(String),

    #[error("Invalid cell address: row {row}, column {col}")]
    InvalidAddress { row: usize, col: usize },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
