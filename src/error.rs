use arrow::error::ArrowError;
use thiserror::Error;

/// Fatal failures of the mapping core. Row-level problems are never reported
/// here; they end up in [`crate::mapping::Diagnostics`].
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("column '{column}' not found in {table} table")]
    ColumnNotFound { column: String, table: &'static str },
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
