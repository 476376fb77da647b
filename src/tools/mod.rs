//! Dashboard tools
//!
//! Everything the two dashboards show or write: insights, tips, CSV export,
//! charts and the static dataset view.

pub mod charts;
pub mod dataset;
pub mod export;
pub mod insights;
pub mod tips;

use thiserror::Error;

use crate::db::DbError;

/// Tool error types
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("No data to chart")]
    NoData,

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Result type for tool operations
pub type ToolResult<T> = Result<T, ToolError>;
