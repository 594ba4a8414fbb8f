use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoPackage write error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("File '{}' does not exist", path.display())]
    InputNotFound { path: PathBuf },

    #[error(
        "Schema mismatch in '{}' at line {line}: expected {expected} columns, found {found}",
        path.display()
    )]
    SchemaMismatch {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error(
        "Error reading CSV file '{}': line {line}, column '{column}' value '{value}' is not a valid {expected}",
        path.display()
    )]
    FieldCoercion {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Timezone error: {0}")]
    Timezone(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
