pub mod config;
pub mod format;
pub use config::AnalysisPolicy;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),
    #[error("dataset has no columns")]
    EmptyDataset,
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("ingestion error: {0}")]
    Ingest(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TableLensError>;
