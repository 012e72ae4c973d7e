use crate::engine::error::VwfoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableIoError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid entry '{text}' in row '{row}', column '{column}'")]
    InvalidCell {
        row: String,
        column: String,
        text: String,
    },

    #[error(transparent)]
    Validation(#[from] VwfoError),
}
