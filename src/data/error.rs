use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn the source file into a region table.
///
/// Any of these is fatal for the dashboard: nothing is rendered without data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot open workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },

    #[error("sheet '{sheet}' not found (available: {available})")]
    SheetNotFound { sheet: String, available: String },

    #[error("source table has no header row")]
    EmptySheet,

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: '{column}' value '{value}' is not a whole number")]
    InvalidScore {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: '{column}' value {value} is outside 1..=5")]
    ScoreOutOfRange {
        row: usize,
        column: String,
        value: i64,
    },

    #[error("region '{0}' appears more than once")]
    DuplicateRegion(String),

    #[error("unexpected layout: {0}")]
    Layout(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}
